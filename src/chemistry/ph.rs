//! pH as a function of added titrant volume
//!
//! # Equivalence bookkeeping
//!
//! ```text
//! n_acid  = C_acid · V_acid / 1000        [mol]
//! n_base  = C_base · V_added / 1000       [mol]
//! V_total = (V_acid + V_added) / 1000     [L]
//! ```
//!
//! The comparison between `n_base` and `n_acid` is an exact three-way
//! comparison. The equivalence branch is what keeps `log10(0)` out of the
//! other two branches when the crossing is hit exactly.
//!
//! The result is not clamped to `[0, 14]`.

use crate::chemistry::{Scenario, TitrationModel};
use crate::models::{StrongAcidModel, WeakAcidModel};

/// Side of the equivalence point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitrationRegime {
    /// Acid in excess (`n_base < n_acid`)
    BeforeEquivalence,

    /// Titrant moles exactly equal acid moles
    AtEquivalence,

    /// Titrant in excess (`n_base > n_acid`)
    AfterEquivalence,
}

impl TitrationRegime {
    pub fn name(&self) -> &str {
        match self {
            TitrationRegime::BeforeEquivalence => "before equivalence",
            TitrationRegime::AtEquivalence => "at equivalence",
            TitrationRegime::AfterEquivalence => "after equivalence",
        }
    }
}

impl std::fmt::Display for TitrationRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which regime applies after adding `volume` mL of titrant
pub fn classify_regime(scenario: &Scenario, volume: f64) -> TitrationRegime {
    let moles_acid = scenario.moles_acid();
    let moles_base = scenario.moles_base(volume);

    if moles_base < moles_acid {
        TitrationRegime::BeforeEquivalence
    } else if moles_base > moles_acid {
        TitrationRegime::AfterEquivalence
    } else {
        TitrationRegime::AtEquivalence
    }
}

/// pH of the flask after adding `volume` mL of titrant
///
/// Pure function of its inputs. `volume` is expected to be `>= 0`.
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::{compute_ph, Scenario};
///
/// let hcl = Scenario::strong_acid("HCl", "HCl", "NaOH", 0.1, 0.1, 25.0).unwrap();
/// assert!((compute_ph(&hcl, 0.0) - 1.0).abs() < 1e-12);
/// assert_eq!(compute_ph(&hcl, 25.0), 7.0);
/// ```
pub fn compute_ph(scenario: &Scenario, volume: f64) -> f64 {
    match scenario.pka() {
        Some(pka) => ph_with_model(&WeakAcidModel::new(pka), scenario, volume),
        None => ph_with_model(&StrongAcidModel::new(), scenario, volume),
    }
}

/// pH of the flask using an explicit model
///
/// Lets callers plug a custom [`TitrationModel`] into the shared mole
/// bookkeeping.
pub fn ph_with_model<M>(model: &M, scenario: &Scenario, volume: f64) -> f64
where
    M: TitrationModel + ?Sized,
{
    let moles_acid = scenario.moles_acid();
    let moles_base = scenario.moles_base(volume);
    let total_volume = scenario.total_volume_litres(volume);

    if moles_base < moles_acid {
        let excess_acid = moles_acid - moles_base;
        model.ph_before_equivalence(moles_base, excess_acid, total_volume)
    } else if moles_base > moles_acid {
        let excess_base = moles_base - moles_acid;
        model.ph_after_equivalence(excess_base, total_volume)
    } else {
        model.ph_at_equivalence()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
