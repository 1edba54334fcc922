//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the validated input history (`PeriodHistory`)
//! - prediction outputs (`PredictionResult`, `OvulationWindow`, `Method`)
//! - the resolved run configuration (`ForecastConfig`)

pub mod history;
pub mod types;

pub use history::*;
pub use types::*;
