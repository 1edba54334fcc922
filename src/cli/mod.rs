//! Command-line parsing for the cycle forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cyc", version, about = "Menstrual cycle length estimator and next-period predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the next period date and ovulation window.
    Predict(PredictArgs),
    /// Print the robust baseline cycle length and how it was derived.
    Estimate(EstimateArgs),
    /// Predict for every history in a CSV file.
    Batch(BatchArgs),
}

/// Options for a single prediction.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Past period start dates (YYYY-MM-DD). Separate with spaces or commas.
    #[arg(required = true, value_delimiter = ',', num_args = 1..)]
    pub dates: Vec<String>,

    /// Use this cycle length (days) instead of the baseline estimate. 0 disables.
    #[arg(short = 'o', long = "override", value_name = "DAYS", allow_negative_numbers = true)]
    pub cycle_length_override: Option<i64>,

    /// Refiner artifact (JSON). Defaults to `CYCLE_MODEL_PATH`.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Ignore any configured refiner.
    #[arg(long)]
    pub no_model: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for the baseline estimate.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Past period start dates (YYYY-MM-DD). Separate with spaces or commas.
    #[arg(value_delimiter = ',', num_args = 0..)]
    pub dates: Vec<String>,
}

/// Options for batch prediction.
#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Input CSV with `id`, `period_dates` (`;`-separated) and optional `cycle_length_override`.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Export per-row results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Refiner artifact (JSON). Defaults to `CYCLE_MODEL_PATH`.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Ignore any configured refiner.
    #[arg(long)]
    pub no_model: bool,

    /// Print results as JSON lines.
    #[arg(long)]
    pub json: bool,
}
