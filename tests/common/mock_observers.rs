//! Observers recording session events for assertions

use std::sync::{Arc, Mutex};

use titration_rs::chemistry::{Sample, Scenario};
use titration_rs::session::SessionObserver;

/// Event seen by a [`RecordingObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Reset(String),
    Sample(Sample),
    Complete(Sample),
}

/// Observer pushing every event into a shared log
///
/// The session owns the observer; the test keeps a clone of the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Complete(_)))
            .count()
    }

    pub fn resets(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SessionEvent::Reset(_)))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl SessionObserver for RecordingObserver {
    fn on_reset(&mut self, scenario: &Scenario) {
        self.events.lock().unwrap().push(SessionEvent::Reset(scenario.name().to_string()));
    }

    fn on_sample(&mut self, sample: &Sample) {
        self.events.lock().unwrap().push(SessionEvent::Sample(*sample));
    }

    fn on_complete(&mut self, final_sample: &Sample) {
        self.events.lock().unwrap().push(SessionEvent::Complete(*final_sample));
    }
}
