//! Clock-driven continuous addition
//!
//! [`ContinuousAddition`] turns elapsed time into session ticks: one tick
//! per interval, in order, none skipped. The caller polls it from its own
//! loop (a UI frame callback, a game loop, a test) and the driver applies
//! every tick that has fallen due since the last poll.
//!
//! The driver holds no reference to the session between polls. Pausing or
//! resetting the session is enough to cancel: the next poll sees that the
//! session is no longer running and applies nothing.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use titration_rs::chemistry::ScenarioCatalog;
//! use titration_rs::session::{ContinuousAddition, ManualClock, TitrationSession};
//!
//! let mut session = TitrationSession::new(ScenarioCatalog::builtin().default_scenario().clone());
//! let clock = ManualClock::new();
//! let mut driver = ContinuousAddition::for_session(clock.clone(), &session);
//!
//! driver.start(&mut session);
//! clock.advance(Duration::from_millis(1_000));
//! assert_eq!(driver.poll(&mut session), 10);
//! assert!((session.current_volume() - 1.0).abs() < 1e-9);
//! ```

use std::time::{Duration, Instant};

use crate::session::clock::Clock;
use crate::session::state::{TickOutcome, TitrationSession};

/// Scheduled tick of a specific run
#[derive(Debug, Clone, Copy)]
struct Schedule {
    run_generation: u64,
    next_due: Instant,
}

/// Periodic driver of [`TitrationSession::tick`]
#[derive(Debug)]
pub struct ContinuousAddition<C: Clock> {
    clock: C,
    interval: Duration,
    schedule: Option<Schedule>,
}

impl<C: Clock> ContinuousAddition<C> {
    /// Driver ticking every `interval`
    ///
    /// # Panics
    ///
    /// Panics when `interval` is zero.
    pub fn new(clock: C, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "tick interval must be greater than 0");
        Self {
            clock,
            interval,
            schedule: None,
        }
    }

    /// Driver using the session's configured cadence
    pub fn for_session(clock: C, session: &TitrationSession) -> Self {
        Self::new(clock, session.configuration().tick_interval_duration())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick falls due, if a run is scheduled
    pub fn next_due(&self) -> Option<Instant> {
        self.schedule.map(|s| s.next_due)
    }

    /// Start continuous addition if it is not already running
    ///
    /// The first tick falls due one interval from now. Returns whether the
    /// session is running afterwards (false when the burette is full).
    pub fn start(&mut self, session: &mut TitrationSession) -> bool {
        if !session.is_running() {
            session.toggle_running();
        }
        if session.is_running() {
            self.schedule = Some(self.fresh_schedule(session));
        }
        session.is_running()
    }

    /// Pause continuous addition
    pub fn stop(&mut self, session: &mut TitrationSession) {
        if session.is_running() {
            session.toggle_running();
        }
        self.schedule = None;
    }

    /// Apply every tick that has fallen due
    ///
    /// Returns the number of increments applied. Stops early when the run
    /// completes.
    pub fn poll(&mut self, session: &mut TitrationSession) -> usize {
        if !session.is_running() {
            self.schedule = None;
            return 0;
        }

        let mut schedule = match self.schedule {
            Some(s) if s.run_generation == session.run_generation() => s,
            // Run started (or restarted) outside the driver
            _ => self.fresh_schedule(session),
        };

        let now = self.clock.now();
        let mut applied = 0;

        while schedule.next_due <= now {
            match session.tick() {
                TickOutcome::Added(sample) => {
                    applied += 1;
                    schedule.next_due += self.interval;
                    tracing::debug!(volume_ml = sample.volume_added, "continuous tick");
                }
                TickOutcome::Completed(_) => {
                    self.schedule = None;
                    return applied + 1;
                }
                TickOutcome::Idle => {
                    self.schedule = None;
                    return applied;
                }
            }
        }

        self.schedule = Some(schedule);
        applied
    }

    fn fresh_schedule(&self, session: &TitrationSession) -> Schedule {
        Schedule {
            run_generation: session.run_generation(),
            next_due: self.clock.now() + self.interval,
        }
    }
}
