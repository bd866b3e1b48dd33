//! Integration tests: chemistry module + session module
//!
//! These tests verify that the pH model and the titration session
//! work correctly together.

use titration_rs::chemistry::{
    IndicatorBand, PhClass, Scenario, ScenarioSpec, TitrationRegime, classify_regime, compute_ph,
    titration_curve,
};
use titration_rs::config::{SessionConfiguration, TitrationConfig};
use titration_rs::session::{SessionPhase, TitrationSession};

mod common;
use common::{
    RecordingObserver, SessionEvent, assert_ph_close, assert_series_invariants, strong_scenario,
    weak_scenario,
};

// =================================================================================================
// pH Model
// =================================================================================================

#[test]
fn test_volume_zero_uses_full_acid_amount() {
    // Strong acid: [H3O+] = 0.1 mol/L undiluted
    let strong = strong_scenario();
    assert_eq!(classify_regime(&strong, 0.0), TitrationRegime::BeforeEquivalence);
    assert_ph_close(compute_ph(&strong, 0.0), 1.0, 1e-12, "strong acid at 0 mL");

    // Weak acid: no conjugate base yet, log10(0) = -inf
    let weak = weak_scenario();
    assert_eq!(classify_regime(&weak, 0.0), TitrationRegime::BeforeEquivalence);
    assert_eq!(compute_ph(&weak, 0.0), f64::NEG_INFINITY);
}

#[test]
fn test_strong_acid_curve_is_monotonic() {
    let strong = strong_scenario();
    let curve = titration_curve(&strong, 50.0, 0.5).unwrap();

    assert_eq!(curve.len(), 101);
    for pair in curve.windows(2) {
        assert!(
            pair[0].ph <= pair[1].ph,
            "pH decreased between {} mL and {} mL",
            pair[0].volume_added,
            pair[1].volume_added
        );
    }
}

#[test]
fn test_exact_equivalence_values() {
    let strong = strong_scenario();
    assert_eq!(strong.equivalence_volume(), 25.0);
    assert_eq!(compute_ph(&strong, 25.0), 7.0);

    let weak = weak_scenario();
    assert_eq!(weak.equivalence_volume(), 25.0);
    assert_eq!(compute_ph(&weak, 25.0), 8.5);
}

#[test]
fn test_weak_acid_half_equivalence_equals_pka() {
    let weak = weak_scenario();
    assert_ph_close(compute_ph(&weak, 12.5), 4.76, 1e-6, "half-equivalence");
}

#[test]
fn test_past_equivalence_is_independent_of_acid_strength() {
    let strong = strong_scenario();
    let weak = weak_scenario();

    for volume in [25.5, 30.0, 40.0, 50.0] {
        assert_eq!(compute_ph(&strong, volume), compute_ph(&weak, volume));
    }
    // 25 mL excess of 0.1 M NaOH in 75 mL
    let expected = 14.0 + (0.1f64 * 25.0 / 75.0).log10();
    assert_ph_close(compute_ph(&strong, 50.0), expected, 1e-12, "50 mL");
}

#[test]
fn test_unequal_concentrations_shift_equivalence() {
    let scenario =
        Scenario::strong_acid("Concentrated base", "HCl", "NaOH", 0.1, 0.2, 25.0).unwrap();
    assert!((scenario.equivalence_volume() - 12.5).abs() < 1e-9);
    assert_eq!(classify_regime(&scenario, 10.0), TitrationRegime::BeforeEquivalence);
    assert_eq!(classify_regime(&scenario, 20.0), TitrationRegime::AfterEquivalence);
}

#[test]
fn test_indicator_follows_curve() {
    let strong = strong_scenario();
    assert_eq!(PhClass::of(compute_ph(&strong, 10.0)), PhClass::Acidic);
    assert_eq!(PhClass::of(compute_ph(&strong, 25.0)), PhClass::Neutral);
    assert_eq!(PhClass::of(compute_ph(&strong, 30.0)), PhClass::Basic);

    assert_eq!(IndicatorBand::of(compute_ph(&strong, 0.0)), IndicatorBand::Acid);
    assert_eq!(IndicatorBand::of(compute_ph(&strong, 50.0)), IndicatorBand::Base);
}

// =================================================================================================
// Session
// =================================================================================================

#[test]
fn test_repeated_additions_clamp_at_capacity() {
    let mut session = TitrationSession::new(strong_scenario());

    for _ in 0..9 {
        session.add_volume(5.0).unwrap();
    }
    assert_eq!(session.current_volume(), 45.0);

    session.add_volume(5.0).unwrap();
    assert_eq!(session.current_volume(), 50.0);
    assert!(session.is_complete());

    for _ in 0..3 {
        assert_eq!(session.add_volume(5.0).unwrap(), None);
        assert_eq!(session.current_volume(), 50.0);
    }
    assert_eq!(session.series().len(), 11);
    assert_series_invariants(&session);
}

#[test]
fn test_reset_always_leaves_single_sample() {
    let mut session = TitrationSession::new(weak_scenario());
    session.reset();
    assert_eq!(session.series().len(), 1);

    session.add_volume(12.5).unwrap();
    session.toggle_running();
    session.tick();
    assert_series_invariants(&session);
    session.reset();

    assert_eq!(session.series().len(), 1);
    assert_eq!(session.series()[0].volume_added, 0.0);
    assert_eq!(session.phase(), SessionPhase::Idle);

    session.add_volume(60.0).unwrap();
    session.reset();
    assert_eq!(session.series().len(), 1);
    assert!(!session.is_complete());
}

#[test]
fn test_continuous_run_terminates_from_near_full() {
    let mut session = TitrationSession::new(strong_scenario());
    session.add_volume(49.95).unwrap();
    assert!(session.toggle_running());

    let mut ticks = 0;
    while session.is_running() {
        session.tick();
        ticks += 1;
        assert!(ticks <= 2, "run did not terminate");
    }

    assert_eq!(ticks, 1);
    assert!(session.is_complete());
    assert_eq!(session.current_volume(), 50.0);
}

#[test]
fn test_full_continuous_run_by_ticks() {
    let mut session = TitrationSession::new(strong_scenario());
    let observer = RecordingObserver::new();
    session.subscribe(observer.clone());

    session.toggle_running();
    let mut ticks = 0;
    while session.tick().should_continue() {
        ticks += 1;
        assert!(ticks < 1_000, "run did not terminate");
    }

    assert!(session.is_complete());
    assert_eq!(session.current_volume(), 50.0);
    assert_series_invariants(&session);
    assert_eq!(observer.completions(), 1);

    // Nothing happens once complete
    assert!(!session.toggle_running());
    assert_eq!(observer.completions(), 1);
}

#[test]
fn test_tick_series_steps_past_exact_equivalence() {
    let mut session = TitrationSession::new(strong_scenario());
    session.toggle_running();
    while session.current_volume() < 25.2 {
        session.tick();
    }

    // Accumulated 0.1 mL ticks never hit 25 mL exactly
    let series = session.series();
    let crossing = series.iter().position(|s| s.volume_added >= 25.0).unwrap();
    let (before, at, after) = (series[crossing - 1], series[crossing], series[crossing + 1]);

    assert_eq!(at.volume_added, 25.000000000000085);
    assert_eq!(
        classify_regime(session.scenario(), at.volume_added),
        TitrationRegime::AfterEquivalence
    );

    // A vanishing hydroxide excess reads as a strongly negative pH, not 7
    assert_ph_close(before.ph, 3.6981005456237663, 1e-9, "last tick before equivalence");
    assert_ph_close(at.ph, -1.7607697441748904, 1e-9, "first tick past equivalence");
    assert!(after.ph > 10.0, "pH {} one tick later", after.ph);
}

#[test]
fn test_scenario_switch_mid_run() {
    let mut session = TitrationSession::new(strong_scenario());
    let observer = RecordingObserver::new();
    session.subscribe(observer.clone());

    session.toggle_running();
    for _ in 0..20 {
        session.tick();
    }
    assert!(session.is_running());

    session.select_scenario(weak_scenario());

    assert!(!session.is_running());
    assert_eq!(session.series().len(), 1);
    assert_eq!(session.series()[0].volume_added, 0.0);
    assert_eq!(session.scenario().name(), "Weak Acid - Strong Base");
    assert_eq!(session.series()[0].ph, f64::NEG_INFINITY);
    assert_eq!(
        observer.events().last(),
        Some(&SessionEvent::Reset("Weak Acid - Strong Base".to_string()))
    );

    // A tick from a stale driver adds nothing
    session.tick();
    assert_eq!(session.series().len(), 1);
}

#[test]
fn test_invalid_scenario_leaves_session_untouched() {
    let mut session = TitrationSession::new(strong_scenario());
    session.add_volume(10.0).unwrap();

    let spec = ScenarioSpec {
        name: "Broken".to_string(),
        strong_acid: false,
        pka: None,
        ..strong_scenario().to_spec()
    };
    let err = session.select_scenario_spec(spec).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(session.current_volume(), 10.0);
    assert_eq!(session.scenario().name(), "Strong Acid - Strong Base");
}

#[test]
fn test_invalid_increment_is_rejected() {
    let mut session = TitrationSession::new(strong_scenario());
    for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(session.add_volume(amount).unwrap_err().is_argument());
    }
    assert_eq!(session.series().len(), 1);
}

#[test]
fn test_session_from_toml_configuration() {
    let raw = r#"
        [session]
        max_volume_ml = 30.0
        auto_increment_ml = 0.5

        [[scenarios]]
        name = "Formic acid"
        acid = "HCOOH"
        base = "NaOH"
        acid_concentration = 0.1
        base_concentration = 0.1
        initial_acid_volume = 20.0
        strong_acid = false
        pka = 3.75
    "#;

    let config = TitrationConfig::from_toml_str(raw).unwrap();
    let catalog = config.catalog().unwrap();
    let scenario = catalog.default_scenario().clone();

    let mut session = TitrationSession::with_configuration(scenario, config.session).unwrap();
    assert_eq!(session.max_volume(), 30.0);
    assert_eq!(session.equivalence_point_volume(), 20.0);
    assert_ph_close(compute_ph(session.scenario(), 10.0), 3.75, 1e-9, "formic half-equivalence");

    session.toggle_running();
    let mut ticks = 0;
    while session.tick().should_continue() {
        ticks += 1;
    }
    assert_eq!(ticks + 1, 60);
    assert_eq!(session.current_volume(), 30.0);
}

#[test]
fn test_custom_capacity_is_validated() {
    let config = SessionConfiguration::default().max_volume(0.05).auto_increment(0.1);
    let err = TitrationSession::with_configuration(strong_scenario(), config).unwrap_err();
    assert!(err.is_configuration());
}
