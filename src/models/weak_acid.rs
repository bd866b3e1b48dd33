//! Weak monoprotic acid titrated by a strong base
//!
//! Before the equivalence point the flask is a buffer of the remaining acid
//! HA and its conjugate base A⁻. Every mole of titrant converts one mole of
//! HA into A⁻, so the Henderson–Hasselbalch approximation reads:
//!
//! ```text
//! pH = pKa + log10(n_A- / n_HA) = pKa + log10(n_base / (n_acid - n_base))
//! ```
//!
//! Dilution cancels in the ratio. At half-equivalence `n_base == n_HA` and
//! the pH equals the pKa.
//!
//! At equivalence the solution holds only A⁻, which hydrolyses to a mildly
//! basic pH. The model reports a fixed value for that point rather than
//! solving the Kb equilibrium.

use crate::chemistry::TitrationModel;

/// pH reported exactly at the equivalence point of a weak acid
pub const WEAK_ACID_EQUIVALENCE_PH: f64 = 8.5;

/// Weak acid / strong base model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeakAcidModel {
    /// Acid dissociation exponent
    pka: f64,
}

impl WeakAcidModel {
    pub fn new(pka: f64) -> Self {
        Self { pka }
    }

    pub fn pka(&self) -> f64 {
        self.pka
    }
}

impl TitrationModel for WeakAcidModel {
    fn ph_before_equivalence(
        &self,
        moles_base: f64,
        excess_acid: f64,
        _total_volume_litres: f64,
    ) -> f64 {
        if excess_acid == 0.0 {
            return self.pka;
        }
        self.pka + (moles_base / excess_acid).log10()
    }

    fn ph_at_equivalence(&self) -> f64 {
        WEAK_ACID_EQUIVALENCE_PH
    }

    fn name(&self) -> &str {
        "Weak Acid (Henderson-Hasselbalch)"
    }
}
