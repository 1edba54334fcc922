//! Next-period prediction.
//!
//! Responsibilities:
//!
//! - merge the caller override with the robust baseline
//! - project the next period from the most recent start date
//! - consult the learned refiner (if any) and fall back silently on failure
//! - derive the ovulation window from the final projection

pub mod predictor;
pub mod window;

pub use predictor::*;
pub use window::*;
