//! Helper functions for integration tests

use titration_rs::chemistry::{Scenario, ScenarioCatalog};
use titration_rs::session::TitrationSession;

/// Built-in 0.1 M HCl / 0.1 M NaOH scenario
pub fn strong_scenario() -> Scenario {
    ScenarioCatalog::builtin()
        .get("Strong Acid - Strong Base")
        .expect("built-in strong scenario")
        .clone()
}

/// Built-in 0.1 M acetic acid / 0.1 M NaOH scenario
pub fn weak_scenario() -> Scenario {
    ScenarioCatalog::builtin()
        .get("Weak Acid - Strong Base")
        .expect("built-in weak scenario")
        .clone()
}

/// Assert that a pH value is within `tolerance` of `expected`
pub fn assert_ph_close(actual: f64, expected: f64, tolerance: f64, message: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff < tolerance,
        "{}: pH {} differs from {} by {} (tolerance {})",
        message, actual, expected, diff, tolerance
    );
}

/// Check the structural invariants of a session's series
///
/// Starts at volume 0, strictly increasing volumes, never above the burette
/// capacity, and the last sample sits at the current volume.
pub fn assert_series_invariants(session: &TitrationSession) {
    let series = session.series();
    let max_volume = session.max_volume();

    assert!(!series.is_empty(), "series must never be empty");
    assert_eq!(series[0].volume_added, 0.0, "series must start at volume 0");

    for (i, pair) in series.windows(2).enumerate() {
        assert!(
            pair[0].volume_added < pair[1].volume_added,
            "volumes not increasing at index {}: {} then {}",
            i, pair[0].volume_added, pair[1].volume_added
        );
    }

    for sample in series {
        assert!(
            sample.volume_added <= max_volume,
            "volume {} exceeds capacity {}",
            sample.volume_added, max_volume
        );
    }

    let last = series[series.len() - 1];
    assert_eq!(
        last.volume_added,
        session.current_volume(),
        "last sample is not at the current volume"
    );
}
