//! Sample quantiles with linear interpolation.
//!
//! For sorted values `a[0..n]` and probability `p`:
//!
//! ```text
//! pos = (n - 1) * p
//! q   = a[floor(pos)] + (a[ceil(pos)] - a[floor(pos)]) * (pos - floor(pos))
//! ```
//!
//! This is the "linear" (type 7) definition and matches the default percentile
//! computation of the common numeric libraries.

/// Quantile of already-sorted values. Returns `None` for empty input or `p`
/// outside `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let pos = (sorted.len() - 1) as f64 * p;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// First and third quartiles of unsorted values.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some((quantile_sorted(&sorted, 0.25)?, quantile_sorted(&sorted, 0.75)?))
}

/// Arithmetic mean. `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
