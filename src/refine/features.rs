//! Refiner input features.
//!
//! Layout (fixed, matches the training data of the refiner artifacts):
//!
//! | index | feature               |
//! |-------|-----------------------|
//! | 0     | most recent gap (days)|
//! | 1     | number of gaps        |
//! | 2     | mean gap (days)       |

use nalgebra::Vector3;

use crate::domain::PeriodHistory;

/// Number of features a refiner consumes.
pub const FEATURE_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(Vector3<f64>);

impl FeatureVector {
    pub fn new(most_recent_delta: f64, count: f64, mean_delta: f64) -> Self {
        Self(Vector3::new(most_recent_delta, count, mean_delta))
    }

    /// Build features from the sorted history.
    ///
    /// With fewer than two dates there is no gap, so the gap list is taken to
    /// be `[cycle_length]`.
    pub fn from_history(history: &PeriodHistory, cycle_length: i64) -> Self {
        let mut deltas = history.deltas();
        if deltas.is_empty() {
            deltas.push(cycle_length);
        }

        let last = *deltas.last().unwrap_or(&cycle_length) as f64;
        let count = deltas.len() as f64;
        let mean = deltas.iter().sum::<i64>() as f64 / count;

        Self::new(last, count, mean)
    }

    pub fn most_recent_delta(&self) -> f64 {
        self.0[0]
    }

    pub fn count(&self) -> f64 {
        self.0[1]
    }

    pub fn mean_delta(&self) -> f64 {
        self.0[2]
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied()
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }
}
