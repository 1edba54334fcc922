//! Learned refinement of the baseline cycle length.
//!
//! A refiner is an externally trained regression model evaluated on a fixed
//! 3-element feature vector. The engine never trains models; it only loads an
//! artifact and calls it. Refiners are untrusted: every failure is reported as
//! a `RefineError` and the predictor falls back to the baseline.

pub mod artifact;
pub mod features;
pub mod forest;
pub mod linear;

pub use artifact::*;
pub use features::*;
pub use forest::*;
pub use linear::*;

use thiserror::Error;

/// Why a refiner could not produce a usable value.
#[derive(Debug, Error)]
pub enum RefineError {
    #[error("feature shape mismatch: expected {expected} values, got {got}")]
    Shape { expected: usize, got: usize },

    #[error("invalid tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },

    #[error("model produced a non-finite value")]
    NonFinite,

    #[error("failed to read model artifact '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A predict-from-feature-vector capability.
///
/// Implementations must be pure with respect to the engine: the same features
/// give the same answer, and a shared instance is safe to call from many threads.
pub trait Refiner: Send + Sync + std::fmt::Debug {
    /// Predict the next cycle length (days) from the features.
    fn predict(&self, features: &FeatureVector) -> Result<f64, RefineError>;
}
