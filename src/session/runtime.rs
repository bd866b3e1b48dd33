//! Asynchronous continuous addition on tokio
//!
//! [`spawn_continuous_addition`] starts a run on a shared session and drives
//! it from a tokio task with a fixed-interval ticker. Each tick takes the
//! session lock, checks that the session is still running and applies at
//! most one increment, so pausing or resetting through the same lock stops
//! the task before its next addition.
//!
//! The task ends when:
//! - the burette is full ([`RunEnd::Completed`])
//! - the run it started is over (pause, reset, scenario change) ([`RunEnd::Stopped`])
//! - the handle is cancelled ([`RunEnd::Cancelled`])
//!
//! Tests run it under `tokio::test(start_paused = true)`, where the ticker
//! advances on virtual time.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::error::{Result, TitrationError};
use crate::session::state::TickOutcome;
use crate::session::SharedSession;

/// Why a continuous-addition task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Burette capacity reached
    Completed,
    /// Session no longer running when a tick fell due
    Stopped,
    /// [`ContinuousAdditionHandle::cancel`] was called
    Cancelled,
}

/// Outcome of a finished task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Increments applied by the task
    pub ticks: usize,
    pub end: RunEnd,
}

/// Handle on a running continuous-addition task
///
/// Dropping the handle detaches the task: it keeps adding titrant until the
/// burette is full or the session stops running.
#[derive(Debug)]
pub struct ContinuousAdditionHandle {
    session: SharedSession,
    generation: u64,
    cancel: watch::Sender<bool>,
    task: JoinHandle<Result<RunSummary>>,
}

impl ContinuousAdditionHandle {
    /// Pause the run this task drives and stop the task
    ///
    /// The session is paused under its lock before this returns, so no
    /// increment is applied afterwards. A run restarted by someone else is
    /// left alone.
    pub fn cancel(&self) -> Result<()> {
        {
            let mut session = self
                .session
                .lock()
                .map_err(|_| TitrationError::Runtime("session lock poisoned".to_string()))?;
            if session.is_running() && session.run_generation() == self.generation {
                session.toggle_running();
            }
        }
        // The task may already have exited; nothing to signal then
        let _ = self.cancel.send(true);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task to end
    pub async fn join(self) -> Result<RunSummary> {
        self.task.await.map_err(|e| {
            TitrationError::Runtime(format!("continuous addition task failed: {}", e))
        })?
    }
}

/// Start continuous addition on `session` and drive it from a tokio task
///
/// Uses the session's configured tick interval. The first increment is
/// applied one interval after the call.
///
/// # Errors
///
/// - `Argument` when the burette is already full
/// - `Runtime` when the session lock is poisoned
///
/// Must be called from within a tokio runtime.
pub fn spawn_continuous_addition(session: SharedSession) -> Result<ContinuousAdditionHandle> {
    let (period, generation) = {
        let mut guard = session
            .lock()
            .map_err(|_| TitrationError::Runtime("session lock poisoned".to_string()))?;
        if !guard.is_running() && !guard.toggle_running() {
            return Err(TitrationError::argument(format!(
                "cannot start continuous addition at {} mL (capacity {} mL)",
                guard.current_volume(),
                guard.max_volume()
            )));
        }
        (guard.configuration().tick_interval_duration(), guard.run_generation())
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let task = tokio::spawn(drive(session.clone(), period, generation, cancel_rx));

    Ok(ContinuousAdditionHandle {
        session,
        generation,
        cancel: cancel_tx,
        task,
    })
}

async fn drive(
    session: SharedSession,
    period: Duration,
    generation: u64,
    mut cancel: watch::Receiver<bool>,
) -> Result<RunSummary> {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut ticks = 0;
    // Dropping the handle detaches the task; it keeps running until the run ends
    let mut attached = true;

    loop {
        tokio::select! {
            biased;

            changed = cancel.changed(), if attached => {
                if changed.is_err() {
                    attached = false;
                } else if *cancel.borrow() {
                    tracing::debug!(ticks, "continuous addition cancelled");
                    return Ok(RunSummary { ticks, end: RunEnd::Cancelled });
                }
            }

            _ = ticker.tick() => {
                let outcome = {
                    let mut guard = session
                        .lock()
                        .map_err(|_| TitrationError::Runtime("session lock poisoned".to_string()))?;
                    // A run restarted after a pause belongs to whoever restarted it
                    if guard.run_generation() == generation {
                        guard.tick()
                    } else {
                        TickOutcome::Idle
                    }
                };

                match outcome {
                    TickOutcome::Added(sample) => {
                        ticks += 1;
                        tracing::debug!(
                            volume_ml = sample.volume_added,
                            ph = sample.ph,
                            "continuous tick"
                        );
                    }
                    TickOutcome::Completed(_) => {
                        ticks += 1;
                        return Ok(RunSummary { ticks, end: RunEnd::Completed });
                    }
                    TickOutcome::Idle => {
                        tracing::debug!(ticks, "session stopped, continuous addition ends");
                        return Ok(RunSummary { ticks, end: RunEnd::Stopped });
                    }
                }
            }
        }
    }
}
