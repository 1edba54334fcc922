//! Robust baseline estimator.
//!
//! Given sorted period start dates we:
//! - compute consecutive day gaps
//! - drop gaps outside the Tukey fences `[Q1 - 1.5·IQR, Q3 + 1.5·IQR]`
//! - average what is left and round half-to-even
//!
//! A single skipped or double-logged period produces one gap roughly twice or
//! half the usual length; the fences remove it once there are enough gaps to
//! tell it apart.

use tracing::{debug, warn};

use crate::domain::{DEFAULT_CYCLE_LENGTH, PeriodHistory};
use crate::math::{mean, quartiles, round_half_even};

/// Tukey fence multiplier.
const IQR_FENCE: f64 = 1.5;

/// Full breakdown of a baseline estimate (for diagnostics and reports).
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineEstimate {
    pub cycle_length: i64,
    /// All consecutive gaps, calendar order.
    pub deltas: Vec<i64>,
    /// Gaps that survived the IQR filter (or all of them on fallback).
    pub retained: Vec<i64>,
    /// Quartiles of the gaps; `None` when the default was used.
    pub quartiles: Option<(f64, f64)>,
    /// The filter removed every gap and the unfiltered set was used.
    pub used_unfiltered: bool,
    /// Fewer than two distinct dates; `cycle_length` is the default.
    pub is_default: bool,
}

/// Estimate the cycle length in days.
pub fn estimate(history: &PeriodHistory) -> i64 {
    estimate_detailed(history).cycle_length
}

/// Estimate the cycle length and keep the intermediate values.
pub fn estimate_detailed(history: &PeriodHistory) -> BaselineEstimate {
    if history.distinct_count() < 2 {
        debug!(
            dates = history.len(),
            default = DEFAULT_CYCLE_LENGTH,
            "not enough distinct dates; using default cycle length"
        );
        return BaselineEstimate {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            deltas: history.deltas(),
            retained: Vec::new(),
            quartiles: None,
            used_unfiltered: false,
            is_default: true,
        };
    }

    let deltas = history.deltas();
    let values: Vec<f64> = deltas.iter().map(|&d| d as f64).collect();

    // Non-empty: at least two distinct dates means at least one gap.
    let Some((q1, q3)) = quartiles(&values) else {
        return BaselineEstimate {
            cycle_length: DEFAULT_CYCLE_LENGTH,
            deltas,
            retained: Vec::new(),
            quartiles: None,
            used_unfiltered: false,
            is_default: true,
        };
    };

    let iqr = q3 - q1;
    let lower = q1 - IQR_FENCE * iqr;
    let upper = q3 + IQR_FENCE * iqr;

    let mut retained: Vec<i64> = deltas
        .iter()
        .copied()
        .filter(|&d| {
            let d = d as f64;
            d >= lower && d <= upper
        })
        .collect();

    let used_unfiltered = retained.is_empty();
    if used_unfiltered {
        retained = deltas.clone();
    }

    let retained_f: Vec<f64> = retained.iter().map(|&d| d as f64).collect();
    let avg = mean(&retained_f).unwrap_or(DEFAULT_CYCLE_LENGTH as f64);
    let cycle_length = round_half_even(avg);

    debug!(
        deltas = ?deltas,
        q1,
        q3,
        kept = retained.len(),
        dropped = deltas.len() - retained.len().min(deltas.len()),
        mean = avg,
        cycle_length,
        "baseline estimate"
    );
    if cycle_length <= 0 {
        warn!(cycle_length, "non-positive baseline cycle length; check the input dates");
    }

    BaselineEstimate {
        cycle_length,
        deltas,
        retained,
        quartiles: Some((q1, q3)),
        used_unfiltered,
        is_default: false,
    }
}
