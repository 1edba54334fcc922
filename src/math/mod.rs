//! Numeric utilities: quantiles, means, and the rounding convention.

pub mod quantile;
pub mod rounding;

pub use quantile::*;
pub use rounding::*;
