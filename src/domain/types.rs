//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - returned in-memory by the predictor
//! - printed as JSON in the exact shape the API layer serves
//! - exported to CSV by the batch pipeline

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cycle length used when the history holds fewer than two distinct dates.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;

/// Which path produced the returned cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Robust baseline (or caller override).
    Baseline,
    /// Learned refiner output.
    Ml,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Baseline => "baseline",
            Method::Ml => "ml",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated fertile interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvulationWindow {
    #[serde(rename = "ovulation_window_start")]
    pub start: NaiveDate,
    #[serde(rename = "ovulation_window_end")]
    pub end: NaiveDate,
}

/// Output of a single prediction.
///
/// Serializes flat:
/// `next_period_date`, `predicted_cycle_length`, `ovulation_window_start`,
/// `ovulation_window_end`, `method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub next_period_date: NaiveDate,
    pub predicted_cycle_length: i64,
    #[serde(flatten)]
    pub ovulation_window: OvulationWindow,
    pub method: Method,
}

/// A run's configuration as understood by the app layer.
///
/// Derived from CLI flags plus environment (`.env`) defaults.
#[derive(Debug, Clone, Default)]
pub struct ForecastConfig {
    /// Refiner artifact to load, if any.
    pub model_path: Option<PathBuf>,
    /// Caller-supplied cycle length; non-positive values mean "none".
    pub cycle_length_override: Option<i64>,
    /// Print results as JSON instead of text.
    pub json: bool,
}
