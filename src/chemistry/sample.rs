//! A single point of a titration curve

use serde::{Deserialize, Serialize};

/// One `(volume, pH)` reading
///
/// Produced once per volume change by the session, or once per grid point
/// by the theoretical curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Cumulative titrant volume \[mL\]
    pub volume_added: f64,

    /// pH of the flask at that volume
    pub ph: f64,
}

impl Sample {
    pub fn new(volume_added: f64, ph: f64) -> Self {
        Self { volume_added, ph }
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} mL -> pH {:.2}", self.volume_added, self.ph)
    }
}
