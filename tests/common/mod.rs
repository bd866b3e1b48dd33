//! Common utilities for integration tests

pub mod mock_observers;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_observers::{RecordingObserver, SessionEvent};
pub use test_helpers::{assert_ph_close, assert_series_invariants, strong_scenario, weak_scenario};
