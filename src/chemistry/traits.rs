//! Titration model trait
//!
//! A titration model supplies the chemistry of ONE mechanistic regime
//! (strong acid, weak acid). The shared bookkeeping (moles, dilution,
//! which side of the equivalence point we are on) is done once in
//! [`compute_ph`](crate::chemistry::compute_ph); the model only answers
//! the regime-specific questions.

/// pH of the flask once titrant is in excess
///
/// Identical for every acid: the excess hydroxide dominates.
pub fn ph_from_excess_base(excess_base: f64, total_volume_litres: f64) -> f64 {
    let hydroxide = excess_base / total_volume_litres;
    let poh = -hydroxide.log10();
    14.0 - poh
}

/// Trait for acid-base titration models
///
/// # Responsibility
///
/// Computes the pH of the flask for a given side of the equivalence point.
/// Does NOT decide which side applies (that is `compute_ph`'s job).
///
/// Implementations must be cheap: the session calls the model on every
/// volume change, the curve sweep calls it thousands of times.
pub trait TitrationModel: Send + Sync {
    /// pH while acid is still in excess
    ///
    /// # Arguments
    /// * `moles_base` - Titrant moles added so far (all of it has reacted)
    /// * `excess_acid` - Acid moles not yet neutralised, `> 0` in practice
    /// * `total_volume_litres` - Flask volume including added titrant \[L\]
    fn ph_before_equivalence(
        &self,
        moles_base: f64,
        excess_acid: f64,
        total_volume_litres: f64,
    ) -> f64;

    /// pH exactly at the equivalence point
    fn ph_at_equivalence(&self) -> f64;

    /// pH once titrant is in excess
    fn ph_after_equivalence(&self, excess_base: f64, total_volume_litres: f64) -> f64 {
        ph_from_excess_base(excess_base, total_volume_litres)
    }

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_base_ph() {
        // 1e-3 mol OH- in 1 L -> pOH 3 -> pH 11
        assert!((ph_from_excess_base(1e-3, 1.0) - 11.0).abs() < 1e-12);
        // 0.1 M hydroxide
        assert!((ph_from_excess_base(0.005, 0.05) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_excess_base_is_not_clamped() {
        // 10 M hydroxide gives pH 15
        assert!((ph_from_excess_base(10.0, 1.0) - 15.0).abs() < 1e-12);
    }
}
