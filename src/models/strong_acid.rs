//! Strong acid titrated by a strong base
//!
//! The acid is fully dissociated, so before the equivalence point the
//! hydronium concentration is simply the unreacted acid diluted in the
//! current flask volume:
//!
//! ```text
//! [H3O+] = (n_acid - n_base) / V_total
//! pH     = -log10([H3O+])
//! ```
//!
//! At equivalence only water and a neutral salt remain: pH 7.

use crate::chemistry::TitrationModel;

/// pH of a neutral solution
pub const NEUTRAL_PH: f64 = 7.0;

/// Strong acid / strong base model
#[derive(Debug, Clone, Copy, Default)]
pub struct StrongAcidModel;

impl StrongAcidModel {
    pub fn new() -> Self {
        Self
    }
}

impl TitrationModel for StrongAcidModel {
    fn ph_before_equivalence(
        &self,
        _moles_base: f64,
        excess_acid: f64,
        total_volume_litres: f64,
    ) -> f64 {
        let hydronium = excess_acid / total_volume_litres;
        -hydronium.log10()
    }

    fn ph_at_equivalence(&self) -> f64 {
        NEUTRAL_PH
    }

    fn name(&self) -> &str {
        "Strong Acid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_ph_of_decimolar_acid() {
        let model = StrongAcidModel::new();
        // 0.0025 mol in 25 mL -> 0.1 M -> pH 1
        let ph = model.ph_before_equivalence(0.0, 0.0025, 0.025);
        assert!((ph - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dilution_raises_ph() {
        let model = StrongAcidModel::new();
        let concentrated = model.ph_before_equivalence(0.0, 0.001, 0.01);
        let diluted = model.ph_before_equivalence(0.0, 0.001, 0.1);
        assert!((diluted - concentrated - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equivalence_is_neutral() {
        assert_eq!(StrongAcidModel.ph_at_equivalence(), 7.0);
        assert_eq!(StrongAcidModel.name(), "Strong Acid");
    }
}
