//! Input/output helpers.
//!
//! - batch history CSV ingest + validation (`ingest`)
//! - per-row result export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
