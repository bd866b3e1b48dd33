//! Titration session state machine
//!
//! # States
//!
//! ```text
//!              toggle_running              burette full
//!   ┌──────┐ ─────────────────▶ ┌─────────┐ ───────────▶ ┌──────────┐
//!   │ Idle │                    │ Running │              │ Complete │
//!   └──────┘ ◀───────────────── └─────────┘              └──────────┘
//!      ▲        toggle_running                                 │
//!      └───────────────── reset / select_scenario ─────────────┘
//! ```
//!
//! Manual additions are accepted in `Idle` and `Running`. Reaching the
//! burette capacity by any path ends the run.
//!
//! # Invariants
//!
//! - the series is never empty and starts at volume 0 after every reset
//! - the last sample is always at the current volume
//! - the volume never exceeds the burette capacity
//! - the session is never running once the capacity is reached

use crate::chemistry::{
    IndicatorBand, PhClass, Sample, Scenario, ScenarioSpec, TitrationRegime, classify_regime,
    compute_ph,
};
use crate::config::SessionConfiguration;
use crate::error::{Result, TitrationError};
use crate::session::observer::SessionObserver;

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Waiting for input
    Idle,
    /// Continuous addition active
    Running,
    /// Burette capacity reached; terminal until reset
    Complete,
}

/// Result of one continuous-addition step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Session not running: nothing was added
    Idle,
    /// One increment was added
    Added(Sample),
    /// The increment filled the burette and ended the run
    Completed(Sample),
}

impl TickOutcome {
    /// True when the driver should keep ticking
    pub fn should_continue(&self) -> bool {
        matches!(self, TickOutcome::Added(_))
    }
}

/// Live titration
///
/// Owns the cumulative volume, the sample series and the run lifecycle.
/// Every volume change calls the pH model once and appends one sample.
///
/// Not internally synchronised: share it behind a mutex (see
/// [`SharedSession`](crate::session::SharedSession)) when several contexts
/// drive it.
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::ScenarioCatalog;
/// use titration_rs::session::TitrationSession;
///
/// let catalog = ScenarioCatalog::builtin();
/// let mut session = TitrationSession::new(catalog.default_scenario().clone());
///
/// session.add_volume(10.0).unwrap();
/// session.add_volume(15.0).unwrap();
///
/// assert_eq!(session.current_volume(), 25.0);
/// assert_eq!(session.current_ph(), 7.0);
/// assert_eq!(session.series().len(), 3);
/// ```
pub struct TitrationSession {
    scenario: Scenario,
    config: SessionConfiguration,
    volume_added: f64,
    series: Vec<Sample>,
    phase: SessionPhase,
    /// Number of times the session entered `Running`
    run_generation: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl TitrationSession {
    /// New session with the default configuration (50 mL burette)
    pub fn new(scenario: Scenario) -> Self {
        Self::build(scenario, SessionConfiguration::default())
    }

    /// New session with a custom configuration
    ///
    /// # Errors
    ///
    /// `Configuration` when `config` does not validate.
    pub fn with_configuration(scenario: Scenario, config: SessionConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(scenario, config))
    }

    fn build(scenario: Scenario, config: SessionConfiguration) -> Self {
        let initial = Sample::new(0.0, compute_ph(&scenario, 0.0));
        Self {
            scenario,
            config,
            volume_added: 0.0,
            series: vec![initial],
            phase: SessionPhase::Idle,
            run_generation: 0,
            observers: Vec::new(),
        }
    }

    /// Register an event observer
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ====================================== Operations ===========================================

    /// Replace the scenario and start over
    ///
    /// Valid from any phase; a running titration is stopped and its series
    /// discarded.
    pub fn select_scenario(&mut self, scenario: Scenario) {
        tracing::info!(
            scenario = scenario.name(),
            strong_acid = scenario.is_strong_acid(),
            equivalence_ml = scenario.equivalence_volume(),
            "scenario selected"
        );
        self.scenario = scenario;
        self.reset();
    }

    /// Validate raw parameters, then [`select_scenario`](Self::select_scenario)
    ///
    /// # Errors
    ///
    /// `Configuration` when the parameters are invalid. The session is left
    /// untouched in that case.
    pub fn select_scenario_spec(&mut self, spec: ScenarioSpec) -> Result<()> {
        let scenario = Scenario::try_from(spec).inspect_err(|e| {
            tracing::warn!(error = %e, "scenario rejected");
        })?;
        self.select_scenario(scenario);
        Ok(())
    }

    /// Back to volume 0 with a single sample; stops any run
    pub fn reset(&mut self) {
        self.volume_added = 0.0;
        self.series.clear();
        self.series.push(Sample::new(0.0, compute_ph(&self.scenario, 0.0)));
        self.phase = SessionPhase::Idle;

        tracing::info!(scenario = self.scenario.name(), "session reset");
        for observer in &mut self.observers {
            observer.on_reset(&self.scenario);
        }
    }

    /// Add `amount` mL of titrant
    ///
    /// The cumulative volume is clamped to the burette capacity. Returns the
    /// appended sample, or `None` when nothing changed (burette already
    /// full, run complete, or an increment too small to move the volume).
    ///
    /// # Errors
    ///
    /// `Argument` when `amount` is not a positive, finite number.
    pub fn add_volume(&mut self, amount: f64) -> Result<Option<Sample>> {
        if !amount.is_finite() || amount <= 0.0 {
            tracing::warn!(amount, "rejected titrant increment");
            return Err(TitrationError::argument(format!(
                "titrant increment must be positive, got {}",
                amount
            )));
        }
        Ok(self.apply_increment(amount))
    }

    /// Start or pause continuous addition
    ///
    /// Has no effect once the burette is full. Returns the new running flag.
    pub fn toggle_running(&mut self) -> bool {
        self.phase = match self.phase {
            SessionPhase::Idle if self.volume_added < self.config.max_volume_ml => {
                self.run_generation += 1;
                tracing::info!(volume_ml = self.volume_added, "continuous addition started");
                SessionPhase::Running
            }
            SessionPhase::Running => {
                tracing::info!(volume_ml = self.volume_added, "continuous addition paused");
                SessionPhase::Idle
            }
            other => other,
        };
        self.is_running()
    }

    /// One step of the continuous-addition process
    ///
    /// Adds the configured increment if, and only if, the session is
    /// running at the time of the call.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != SessionPhase::Running {
            return TickOutcome::Idle;
        }

        match self.apply_increment(self.config.auto_increment_ml) {
            Some(sample) if self.phase == SessionPhase::Complete => TickOutcome::Completed(sample),
            Some(sample) => TickOutcome::Added(sample),
            None => TickOutcome::Idle,
        }
    }

    fn apply_increment(&mut self, amount: f64) -> Option<Sample> {
        if self.phase == SessionPhase::Complete {
            tracing::debug!(amount, "burette full, addition ignored");
            return None;
        }

        let max_volume = self.config.max_volume_ml;
        let new_volume = (self.volume_added + amount).min(max_volume);
        if new_volume == self.volume_added {
            return None;
        }

        self.volume_added = new_volume;
        let sample = Sample::new(new_volume, compute_ph(&self.scenario, new_volume));
        self.series.push(sample);

        tracing::debug!(volume_ml = sample.volume_added, ph = sample.ph, "sample appended");
        for observer in &mut self.observers {
            observer.on_sample(&sample);
        }

        if new_volume >= max_volume {
            self.complete(sample);
        }
        Some(sample)
    }

    fn complete(&mut self, final_sample: Sample) {
        self.phase = SessionPhase::Complete;

        tracing::info!(
            volume_ml = final_sample.volume_added,
            ph = final_sample.ph,
            samples = self.series.len(),
            "titration complete"
        );
        for observer in &mut self.observers {
            observer.on_complete(&final_sample);
        }
    }

    // ====================================== Accessors ============================================

    /// pH at the current volume, recomputed from the scenario
    pub fn current_ph(&self) -> f64 {
        compute_ph(&self.scenario, self.volume_added)
    }

    /// Cumulative titrant volume \[mL\]
    pub fn current_volume(&self) -> f64 {
        self.volume_added
    }

    /// Samples ordered by increasing volume
    pub fn series(&self) -> &[Sample] {
        &self.series
    }

    /// Reading at the current volume
    pub fn current_sample(&self) -> Sample {
        Sample::new(self.volume_added, self.current_ph())
    }

    /// Equivalence volume of the current scenario \[mL\]
    pub fn equivalence_point_volume(&self) -> f64 {
        self.scenario.equivalence_volume()
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Incremented every time continuous addition starts
    ///
    /// Lets drivers tell a resumed run from the one they scheduled.
    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn configuration(&self) -> &SessionConfiguration {
        &self.config
    }

    /// Burette capacity \[mL\]
    pub fn max_volume(&self) -> f64 {
        self.config.max_volume_ml
    }

    /// Share of the burette already delivered, in `[0, 1]`
    pub fn fill_fraction(&self) -> f64 {
        (self.volume_added / self.config.max_volume_ml).min(1.0)
    }

    /// Side of the equivalence point at the current volume
    pub fn regime(&self) -> TitrationRegime {
        classify_regime(&self.scenario, self.volume_added)
    }

    pub fn ph_class(&self) -> PhClass {
        PhClass::of(self.current_ph())
    }

    pub fn indicator_band(&self) -> IndicatorBand {
        IndicatorBand::of(self.current_ph())
    }
}

impl std::fmt::Debug for TitrationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitrationSession")
            .field("scenario", &self.scenario.name())
            .field("phase", &self.phase)
            .field("volume_added", &self.volume_added)
            .field("samples", &self.series.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::ScenarioCatalog;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Counts {
        resets: usize,
        samples: usize,
        completes: usize,
    }

    struct CountingObserver(Arc<Mutex<Counts>>);

    impl SessionObserver for CountingObserver {
        fn on_reset(&mut self, _scenario: &Scenario) {
            self.0.lock().unwrap().resets += 1;
        }
        fn on_sample(&mut self, _sample: &Sample) {
            self.0.lock().unwrap().samples += 1;
        }
        fn on_complete(&mut self, _final_sample: &Sample) {
            self.0.lock().unwrap().completes += 1;
        }
    }

    fn strong_session() -> TitrationSession {
        TitrationSession::new(ScenarioCatalog::builtin().default_scenario().clone())
    }

    #[test]
    fn test_new_session_has_initial_sample() {
        let session = strong_session();
        assert_eq!(session.series().len(), 1);
        assert_eq!(session.series()[0].volume_added, 0.0);
        assert!((session.current_ph() - 1.0).abs() < 1e-12);
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_add_volume_appends_sample() {
        let mut session = strong_session();
        let sample = session.add_volume(5.0).unwrap().unwrap();

        assert_eq!(sample.volume_added, 5.0);
        assert_eq!(session.series().last(), Some(&sample));
        assert_eq!(session.current_ph(), sample.ph);
    }

    #[test]
    fn test_non_positive_increment_rejected() {
        let mut session = strong_session();
        assert!(session.add_volume(0.0).unwrap_err().is_argument());
        assert!(session.add_volume(-1.0).unwrap_err().is_argument());
        assert!(session.add_volume(f64::INFINITY).unwrap_err().is_argument());
        assert_eq!(session.series().len(), 1);
    }

    #[test]
    fn test_clamp_at_capacity() {
        let mut session = strong_session();
        for _ in 0..10 {
            session.add_volume(5.0).unwrap();
        }
        assert_eq!(session.current_volume(), 50.0);
        assert!(session.is_complete());
        assert_eq!(session.series().len(), 11);

        assert_eq!(session.add_volume(5.0).unwrap(), None);
        assert_eq!(session.current_volume(), 50.0);
        assert_eq!(session.series().len(), 11);
    }

    #[test]
    fn test_overshooting_increment_is_clamped() {
        let mut session = strong_session();
        session.add_volume(48.0).unwrap();
        let sample = session.add_volume(5.0).unwrap().unwrap();
        assert_eq!(sample.volume_added, 50.0);
        assert!(session.is_complete());
    }

    #[test]
    fn test_toggle_running() {
        let mut session = strong_session();
        assert!(session.toggle_running());
        assert_eq!(session.phase(), SessionPhase::Running);
        assert!(!session.toggle_running());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_toggle_has_no_effect_when_full() {
        let mut session = strong_session();
        session.add_volume(50.0).unwrap();
        assert!(!session.toggle_running());
        assert!(session.is_complete());
    }

    #[test]
    fn test_tick_only_adds_while_running() {
        let mut session = strong_session();
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.series().len(), 1);

        session.toggle_running();
        let outcome = session.tick();
        assert!(outcome.should_continue());
        assert!((session.current_volume() - 0.1).abs() < 1e-12);

        session.toggle_running();
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.series().len(), 2);
    }

    #[test]
    fn test_tick_completes_run() {
        let mut session = strong_session();
        session.add_volume(49.95).unwrap();
        session.toggle_running();

        match session.tick() {
            TickOutcome::Completed(sample) => assert_eq!(sample.volume_added, 50.0),
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(!session.is_running());
        assert!(session.is_complete());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_from_complete() {
        let mut session = strong_session();
        session.add_volume(50.0).unwrap();
        session.reset();

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.series().len(), 1);
        assert_eq!(session.current_volume(), 0.0);
    }

    #[test]
    fn test_observer_notifications() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut session = strong_session();
        session.subscribe(CountingObserver(counts.clone()));

        session.add_volume(20.0).unwrap();
        session.add_volume(40.0).unwrap();
        session.add_volume(1.0).unwrap();
        session.reset();

        let counts = counts.lock().unwrap();
        assert_eq!(counts.samples, 2);
        assert_eq!(counts.completes, 1);
        assert_eq!(counts.resets, 1);
    }

    #[test]
    fn test_select_scenario_mid_run() {
        let catalog = ScenarioCatalog::builtin();
        let mut session = strong_session();
        session.toggle_running();
        session.tick();
        session.tick();

        session.select_scenario(catalog.get("Weak Acid - Strong Base").unwrap().clone());

        assert!(!session.is_running());
        assert_eq!(session.series().len(), 1);
        assert_eq!(session.series()[0].volume_added, 0.0);
        assert_eq!(session.scenario().pka(), Some(4.76));
    }

    #[test]
    fn test_invalid_spec_leaves_session_untouched() {
        let mut session = strong_session();
        session.add_volume(3.0).unwrap();

        let mut spec = session.scenario().to_spec();
        spec.strong_acid = false;
        spec.pka = None;

        assert!(session.select_scenario_spec(spec).unwrap_err().is_configuration());
        assert_eq!(session.current_volume(), 3.0);
        assert_eq!(session.series().len(), 2);
    }

    #[test]
    fn test_custom_capacity() {
        let scenario = ScenarioCatalog::builtin().default_scenario().clone();
        let config = SessionConfiguration::default().max_volume(30.0);
        let mut session = TitrationSession::with_configuration(scenario.clone(), config).unwrap();

        session.add_volume(100.0).unwrap();
        assert_eq!(session.current_volume(), 30.0);
        assert_eq!(session.fill_fraction(), 1.0);

        let bad = SessionConfiguration::default().max_volume(-1.0);
        assert!(TitrationSession::with_configuration(scenario, bad).is_err());
    }

    #[test]
    fn test_derived_readouts() {
        let mut session = strong_session();
        assert_eq!(session.equivalence_point_volume(), 25.0);
        assert_eq!(session.ph_class(), PhClass::Acidic);
        assert_eq!(session.indicator_band(), IndicatorBand::Acid);

        session.add_volume(25.0).unwrap();
        assert_eq!(session.regime(), TitrationRegime::AtEquivalence);
        assert_eq!(session.ph_class(), PhClass::Neutral);
        assert_eq!(session.fill_fraction(), 0.5);
    }
}
