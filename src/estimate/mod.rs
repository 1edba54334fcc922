//! Cycle length estimation from historical dates.
//!
//! The baseline is an IQR-trimmed mean of consecutive day gaps. It is the
//! default answer of the predictor and the seed for learned refinement.

pub mod baseline;

pub use baseline::*;
