//! titration-rs: Acid-Base Titration Simulator
//!
//! Simulates the titration of an acid (strong or weak) by a strong base:
//! the pH of the flask as titrant is added, and an interactive session that
//! records the titration curve step by step or continuously.
//!
//! # Architecture
//!
//! titration-rs is built on two layers:
//!
//! 1. **Chemistry** (stateless)
//!    - A [`Scenario`](chemistry::Scenario) describes what is in the flask
//!    - [`compute_ph`](chemistry::compute_ph) gives the pH after any volume of titrant
//!    - Mechanistic regimes are [`TitrationModel`](chemistry::TitrationModel) implementations
//!
//! 2. **Session** (stateful)
//!    - [`TitrationSession`](session::TitrationSession) owns the volume, the series and
//!      the run lifecycle
//!    - Continuous addition is driven by an injectable clock, or by a tokio task
//!
//! # Quick Start
//!
//! ```rust
//! use titration_rs::prelude::*;
//!
//! # fn main() -> titration_rs::error::Result<()> {
//! // 1. Pick a scenario
//! let catalog = ScenarioCatalog::builtin();
//! let scenario = catalog.default_scenario().clone();
//!
//! // 2. Titrate manually
//! let mut session = TitrationSession::new(scenario);
//! session.add_volume(20.0)?;
//! session.add_volume(5.0)?;
//!
//! // 3. Read the result
//! assert_eq!(session.current_ph(), 7.0);
//! assert_eq!(session.equivalence_point_volume(), 25.0);
//! println!("{} samples recorded", session.series().len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`chemistry`]: scenarios, pH computation, indicator classes, theoretical curves
//! - [`models`]: strong and weak acid titration models
//! - [`session`]: titration session, observers, continuous addition
//! - [`config`]: session limits and TOML configuration
//! - [`output`]: CSV export
//! - [`error`]: error type
//!
//! # Features
//!
//! - `runtime` (default): continuous addition as a cancellable tokio task
//! - `parallel`: rayon sweep for large theoretical curves

pub mod chemistry;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod session;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use titration_rs::prelude::*;
    //! ```
    pub use crate::chemistry::{
        IndicatorBand, PhClass, Sample, Scenario, ScenarioCatalog, TitrationModel, TitrationRegime,
        compute_ph, titration_curve,
    };
    pub use crate::config::{SessionConfiguration, TitrationConfig};
    pub use crate::error::{Result, TitrationError};
    pub use crate::models::{StrongAcidModel, WeakAcidModel};
    pub use crate::session::{
        ContinuousAddition, ManualClock, SessionObserver, SessionPhase, SystemClock,
        TitrationSession,
    };
}
