//! `cycle-forecast` library crate.
//!
//! The binary (`cyc`) is a thin wrapper around this library so that:
//!
//! - the estimator and predictor are testable without spawning processes
//! - an API layer can embed the engine directly (`predict::Predictor`)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod logging;
pub mod math;
pub mod predict;
pub mod refine;
pub mod report;
