//! Mechanistic models for acid-base titration
//!
//! All models implement the [`TitrationModel`](crate::chemistry::TitrationModel) trait.
//! `compute_ph` decides which side of the equivalence point applies; models are
//! responsible for the chemistry of that side only.
//!
//! # Available Models
//!
//! ## [`StrongAcidModel`]: fully dissociated acid
//!
//! Hydronium concentration equals the unreacted acid diluted in the flask.
//! Neutral (pH 7) at the equivalence point.
//!
//! ## [`WeakAcidModel`]: single-pKa acid
//!
//! Henderson–Hasselbalch buffer before equivalence, fixed mildly basic pH
//! (8.5) at the equivalence point.
//!
//! After the equivalence point both models share the same excess-hydroxide
//! formula.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod strong_acid;
pub mod weak_acid;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use strong_acid::{NEUTRAL_PH, StrongAcidModel};
pub use weak_acid::{WEAK_ACID_EQUIVALENCE_PH, WeakAcidModel};

use crate::chemistry::{Scenario, TitrationModel};

/// Model matching the scenario's mechanistic regime
///
/// `Scenario` values are validated on construction, so a weak acid always
/// carries its pKa here.
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::{Scenario, TitrationModel};
/// use titration_rs::models::model_for;
///
/// let acetic = Scenario::weak_acid("Acetic", "CH3COOH", "NaOH", 0.1, 0.1, 25.0, 4.76).unwrap();
/// assert_eq!(model_for(&acetic).ph_at_equivalence(), 8.5);
/// ```
pub fn model_for(scenario: &Scenario) -> Box<dyn TitrationModel> {
    match scenario.pka() {
        Some(pka) => Box::new(WeakAcidModel::new(pka)),
        None => Box::new(StrongAcidModel::new()),
    }
}
