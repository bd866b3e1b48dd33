//! Interactive titration session
//!
//! - [`TitrationSession`]: volume, sample series and run lifecycle
//! - [`SessionObserver`]: reset/sample/complete notifications
//! - [`ContinuousAddition`]: clock-driven periodic addition, polled by the caller
//! - `runtime` (feature `runtime`): the same process as a cancellable tokio task
//!
//! # Example
//!
//! ```rust
//! use titration_rs::chemistry::ScenarioCatalog;
//! use titration_rs::session::{SessionPhase, TitrationSession};
//!
//! let mut session = TitrationSession::new(ScenarioCatalog::builtin().default_scenario().clone());
//! session.add_volume(60.0).unwrap();
//!
//! assert_eq!(session.current_volume(), 50.0);
//! assert_eq!(session.phase(), SessionPhase::Complete);
//! ```

use std::sync::{Arc, Mutex};

pub mod clock;
pub mod continuous;
pub mod observer;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use continuous::ContinuousAddition;
pub use observer::{LoggingObserver, SessionObserver};
#[cfg(feature = "runtime")]
pub use runtime::{ContinuousAdditionHandle, RunEnd, RunSummary, spawn_continuous_addition};
pub use state::{SessionPhase, TickOutcome, TitrationSession};

/// Session shared between a UI thread and a background driver
pub type SharedSession = Arc<Mutex<TitrationSession>>;

/// Wrap a session for sharing
pub fn shared(session: TitrationSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}
