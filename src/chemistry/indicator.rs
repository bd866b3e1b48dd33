//! pH classification for readouts and indicator colours
//!
//! Renderers colour the flask and label the curve from these values; the
//! crate itself draws nothing.

use serde::Serialize;

/// Coarse acidity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhClass {
    /// pH < 7
    Acidic,
    /// pH = 7
    Neutral,
    /// pH > 7
    Basic,
}

impl PhClass {
    pub fn of(ph: f64) -> Self {
        if ph < 7.0 {
            PhClass::Acidic
        } else if ph > 7.0 {
            PhClass::Basic
        } else {
            PhClass::Neutral
        }
    }
}

/// Indicator colour band of the flask contents
///
/// ```text
///  pH:   <4      4..6          6..=8     8..10          >10
///       Acid  AcidTransition  Neutral  BaseTransition  Base
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorBand {
    Acid,
    AcidTransition,
    Neutral,
    BaseTransition,
    Base,
}

impl IndicatorBand {
    pub fn of(ph: f64) -> Self {
        if ph < 4.0 {
            IndicatorBand::Acid
        } else if ph > 10.0 {
            IndicatorBand::Base
        } else if (6.0..=8.0).contains(&ph) {
            IndicatorBand::Neutral
        } else if ph < 6.0 {
            IndicatorBand::AcidTransition
        } else {
            IndicatorBand::BaseTransition
        }
    }

    /// Hue (degrees) for the transition bands, `None` for the fixed colours
    ///
    /// The acid side sweeps 30°→90° over pH 4→6, the base side 180°→240°
    /// over pH 8→10.
    pub fn transition_hue(&self, ph: f64) -> Option<f64> {
        match self {
            IndicatorBand::AcidTransition => Some(30.0 + (ph - 4.0) * 30.0),
            IndicatorBand::BaseTransition => Some(180.0 + (ph - 8.0) * 30.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ph_class() {
        assert_eq!(PhClass::of(1.0), PhClass::Acidic);
        assert_eq!(PhClass::of(7.0), PhClass::Neutral);
        assert_eq!(PhClass::of(8.5), PhClass::Basic);
        assert_eq!(PhClass::of(f64::NEG_INFINITY), PhClass::Acidic);
    }

    #[test]
    fn test_indicator_bands() {
        assert_eq!(IndicatorBand::of(1.0), IndicatorBand::Acid);
        assert_eq!(IndicatorBand::of(4.0), IndicatorBand::AcidTransition);
        assert_eq!(IndicatorBand::of(6.0), IndicatorBand::Neutral);
        assert_eq!(IndicatorBand::of(8.0), IndicatorBand::Neutral);
        assert_eq!(IndicatorBand::of(9.0), IndicatorBand::BaseTransition);
        assert_eq!(IndicatorBand::of(10.0), IndicatorBand::BaseTransition);
        assert_eq!(IndicatorBand::of(12.0), IndicatorBand::Base);
    }

    #[test]
    fn test_transition_hue() {
        assert_eq!(IndicatorBand::AcidTransition.transition_hue(5.0), Some(60.0));
        assert_eq!(IndicatorBand::BaseTransition.transition_hue(9.0), Some(210.0));
        assert_eq!(IndicatorBand::Neutral.transition_hue(7.0), None);
    }
}
