//! Acid-base chemistry
//!
//! This module provides the pure, stateless side of the crate: what is in
//! the flask ([`Scenario`]) and what its pH is after a given volume of
//! titrant ([`compute_ph`]).
//!
//! # Core Concepts
//!
//! - **Scenario**: acid, titrant, concentrations and initial volume
//! - **Titration model**: chemistry of one mechanistic regime (strong / weak acid)
//! - **Regime**: which side of the equivalence point the flask is on
//! - **Sample**: one `(volume, pH)` reading
//!
//! # Architecture
//!
//! The chemistry is **separate from the session**:
//! - The chemistry answers "what is the pH at this volume" (no state)
//! - The session decides which volumes are visited, and when
//!
//! # Example
//!
//! ```rust
//! use titration_rs::chemistry::{compute_ph, classify_regime, Scenario, TitrationRegime};
//!
//! let acetic = Scenario::weak_acid(
//!     "Weak Acid - Strong Base", "CH3COOH", "NaOH", 0.1, 0.1, 25.0, 4.76,
//! ).unwrap();
//!
//! // Half-equivalence: pH equals pKa
//! assert!((compute_ph(&acetic, 12.5) - 4.76).abs() < 1e-6);
//!
//! // Equivalence point
//! assert_eq!(classify_regime(&acetic, 25.0), TitrationRegime::AtEquivalence);
//! assert_eq!(compute_ph(&acetic, 25.0), 8.5);
//! ```

// module declaration
pub mod catalog;
pub mod curve;
pub mod indicator;
pub mod ph;
pub mod sample;
pub mod scenario;
pub mod traits;

// re-export commonly used types for convenience
pub use catalog::{ACETIC_ACID_PKA, ScenarioCatalog};
pub use curve::{
    MAX_CURVE_POINTS, curve_parallel_threshold, set_curve_parallel_threshold, titration_curve,
};
pub use indicator::{IndicatorBand, PhClass};
pub use ph::{TitrationRegime, classify_regime, compute_ph, ph_with_model};
pub use sample::Sample;
pub use scenario::{Scenario, ScenarioSpec};
pub use traits::{TitrationModel, ph_from_excess_base};
