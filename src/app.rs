//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - loads the refiner artifact (once)
//! - runs predictions and prints reports
//! - writes optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{BatchArgs, Command, EstimateArgs, PredictArgs};
use crate::domain::{ForecastConfig, PeriodHistory};
use crate::error::AppError;
use crate::predict::Predictor;
use crate::refine::load_refiner;

pub mod pipeline;

/// Environment variable naming the default refiner artifact.
pub const MODEL_PATH_ENV: &str = "CYCLE_MODEL_PATH";

/// Entry point for the `cyc` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    crate::logging::init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Estimate(args) => handle_estimate(args),
        Command::Batch(args) => handle_batch(args),
    }
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = config_from_predict_args(&args, env_model_path());
    let predictor = build_predictor(&config);

    let result = predictor.predict(args.dates.as_slice(), config.cycle_length_override)?;

    if config.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::new(4, format!("Failed to serialize result: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_prediction(&result));
    }
    Ok(())
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let history = PeriodHistory::parse(args.dates.as_slice())?;
    let estimate = crate::estimate::estimate_detailed(&history);
    println!("{}", crate::report::format_estimate(&estimate));
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = ForecastConfig {
        model_path: resolve_model_path(args.model.clone(), args.no_model, env_model_path()),
        cycle_length_override: None,
        json: args.json,
    };
    let predictor = build_predictor(&config);

    let batch = crate::io::ingest::load_histories(&args.input)?;
    let output = pipeline::run_batch(&predictor, batch)?;

    if config.json {
        for outcome in &output.outcomes {
            let line = match &outcome.result {
                Ok(r) => serde_json::json!({ "id": outcome.id, "line": outcome.line, "result": r }),
                Err(e) => serde_json::json!({ "id": outcome.id, "line": outcome.line, "error": e.to_string() }),
            };
            println!("{line}");
        }
    } else {
        println!("{}", crate::report::format_batch(&output));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_results_csv(path, &output.outcomes)?;
    }
    Ok(())
}

/// Load the refiner (if configured) and build the shared predictor.
pub fn build_predictor(config: &ForecastConfig) -> Predictor {
    Predictor::with_refiner(load_refiner(config.model_path.as_deref()))
}

pub fn config_from_predict_args(args: &PredictArgs, env_model: Option<PathBuf>) -> ForecastConfig {
    ForecastConfig {
        model_path: resolve_model_path(args.model.clone(), args.no_model, env_model),
        cycle_length_override: args.cycle_length_override,
        json: args.json,
    }
}

/// `--model` wins over `CYCLE_MODEL_PATH`; `--no-model` disables both.
fn resolve_model_path(flag: Option<PathBuf>, disabled: bool, env_model: Option<PathBuf>) -> Option<PathBuf> {
    if disabled {
        return None;
    }
    flag.or(env_model)
}

fn env_model_path() -> Option<PathBuf> {
    std::env::var_os(MODEL_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Rewrite argv so bare dates default to `cyc predict`.
///
/// Rules:
/// - `cyc 2025-06-01 ...`       -> `cyc predict 2025-06-01 ...`
/// - `cyc --help/--version/-h`  -> unchanged
/// - `cyc <subcommand> ...`     -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_subcommand_or_flag =
        matches!(arg1.as_str(), "predict" | "estimate" | "batch" | "help") || arg1.starts_with('-');
    if is_subcommand_or_flag {
        return argv;
    }

    if arg1.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        argv.insert(1, "predict".to_string());
    }
    argv
}
