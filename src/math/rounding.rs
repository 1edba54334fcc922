//! Rounding convention for day counts.
//!
//! Means of day gaps are rounded half-to-even: `28.5 -> 28`, `29.5 -> 30`.
//! The convention is fixed; changing it moves predicted dates at the boundary.

/// Round to the nearest integer, ties to even.
pub fn round_half_even(x: f64) -> i64 {
    x.round_ties_even() as i64
}
