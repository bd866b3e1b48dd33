//! Session event interface
//!
//! The session never talks to a user directly. Presentation layers register
//! a [`SessionObserver`] and decide how to surface each event (toast, log
//! line, chart refresh).

use crate::chemistry::{Sample, Scenario};

/// Receiver of session events
///
/// All methods default to no-ops so implementors only override what they
/// need. Callbacks run synchronously inside the session operation that
/// triggered them.
pub trait SessionObserver: Send {
    /// The session was reset (explicitly or by a scenario change)
    fn on_reset(&mut self, _scenario: &Scenario) {}

    /// A sample was appended to the series
    fn on_sample(&mut self, _sample: &Sample) {}

    /// The burette capacity was reached; fired once per run
    fn on_complete(&mut self, _final_sample: &Sample) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl SessionObserver for LoggingObserver {
    fn on_reset(&mut self, scenario: &Scenario) {
        tracing::info!(scenario = scenario.name(), "simulation reset");
    }

    fn on_complete(&mut self, final_sample: &Sample) {
        tracing::info!(
            volume_ml = final_sample.volume_added,
            ph = final_sample.ph,
            "titration complete"
        );
    }
}
