//! Theoretical titration curve
//!
//! Evaluates the pH model on a regular volume grid, independently of any
//! session. Renderers draw it as the reference curve; benches use it as a
//! throughput workload.
//!
//! Grid points are computed as `i * step` rather than by accumulating
//! `step`, so a grid that contains the equivalence volume hits it exactly.
//!
//! # Parallel evaluation
//!
//! With the `parallel` feature, grids larger than [`curve_parallel_threshold()`]
//! points are evaluated with Rayon. Below that size the dispatch overhead
//! outweighs the work of a handful of `log10` calls per point.

use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::chemistry::{Sample, Scenario, compute_ph};
use crate::error::{Result, TitrationError};

/// Default grid size above which the sweep switches to Rayon
const DEFAULT_CURVE_PARALLEL_THRESHOLD: usize = 4096;

/// Bound on `max_volume / step` accepted by [`titration_curve`]
pub const MAX_CURVE_POINTS: usize = 1_000_000;

static CURVE_PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_CURVE_PARALLEL_THRESHOLD);

/// Current parallel-evaluation threshold (number of grid points)
pub fn curve_parallel_threshold() -> usize {
    CURVE_PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-evaluation threshold
///
/// # Panics
///
/// Panics when `threshold == 0`.
pub fn set_curve_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "curve parallel threshold must be at least 1");
    CURVE_PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Evaluate the titration curve on `0, step, 2·step, …` up to `max_volume`
///
/// The last grid point is `max_volume` itself when `max_volume` is not a
/// multiple of `step`.
///
/// # Errors
///
/// `Argument` when `step` or `max_volume` is not strictly positive and finite,
/// or when `max_volume / step` reaches [`MAX_CURVE_POINTS`].
///
/// # Example
///
/// ```rust
/// use titration_rs::chemistry::{titration_curve, Scenario};
///
/// let hcl = Scenario::strong_acid("HCl", "HCl", "NaOH", 0.1, 0.1, 25.0).unwrap();
/// let curve = titration_curve(&hcl, 50.0, 0.5).unwrap();
///
/// assert_eq!(curve.len(), 101);
/// assert_eq!(curve[50].ph, 7.0);
/// ```
pub fn titration_curve(scenario: &Scenario, max_volume: f64, step: f64) -> Result<Vec<Sample>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(TitrationError::argument(format!(
            "curve step must be positive, got {}",
            step
        )));
    }
    if !max_volume.is_finite() || max_volume <= 0.0 {
        return Err(TitrationError::argument(format!(
            "curve max volume must be positive, got {}",
            max_volume
        )));
    }
    // Checked in f64 before the cast so a tiny step cannot saturate the grid size
    let intervals = max_volume / step;
    if intervals >= MAX_CURVE_POINTS as f64 {
        return Err(TitrationError::argument(format!(
            "curve of {} mL with step {} mL exceeds {} points",
            max_volume, step, MAX_CURVE_POINTS
        )));
    }

    let grid = volume_grid(max_volume, step);
    let evaluate = |volume: &f64| Sample::new(*volume, compute_ph(scenario, *volume));

    if grid.len() > curve_parallel_threshold() {
        #[cfg(feature = "parallel")]
        return Ok(grid.par_iter().map(evaluate).collect());
    }

    Ok(grid.iter().map(evaluate).collect())
}

fn volume_grid(max_volume: f64, step: f64) -> Vec<f64> {
    let full_steps = (max_volume / step).floor() as usize;
    let mut grid: Vec<f64> = (0..=full_steps)
        .map(|i| i as f64 * step)
        .filter(|volume| *volume <= max_volume)
        .collect();

    if grid.last().is_some_and(|last| *last < max_volume) {
        grid.push(max_volume);
    }
    grid
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
pub(crate) struct CurveThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl CurveThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = curve_parallel_threshold();
        set_curve_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for CurveThresholdGuard {
    fn drop(&mut self) {
        CURVE_PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}
