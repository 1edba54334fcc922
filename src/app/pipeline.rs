//! Shared batch logic used by the `batch` command.
//!
//! Keeping this separate from `app` keeps the workflow testable:
//! CSV ingest -> parallel prediction -> outcomes (results or row errors)
//!
//! Each history is an independent, stateless prediction, so rows are spread
//! across the rayon pool with a shared read-only predictor.

use rayon::prelude::*;
use tracing::info;

use crate::domain::PredictionResult;
use crate::error::{AppError, PredictError};
use crate::io::ingest::{HistoryRow, IngestedBatch, RowError};
use crate::predict::Predictor;

/// Prediction outcome for one input row.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub line: usize,
    pub id: String,
    pub result: Result<PredictionResult, PredictError>,
}

/// All computed outputs of a single `cyc batch` run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// One entry per ingested row, in input order.
    pub outcomes: Vec<BatchOutcome>,
    /// Rows rejected before prediction (CSV/schema problems).
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl BatchOutput {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.row_errors.len() + self.outcomes.len() - self.succeeded()
    }
}

/// Predict every ingested row.
pub fn run_batch(predictor: &Predictor, batch: IngestedBatch) -> Result<BatchOutput, AppError> {
    if batch.rows_read == 0 {
        return Err(AppError::new(3, "Input CSV contains no rows."));
    }

    let outcomes: Vec<BatchOutcome> = batch
        .rows
        .par_iter()
        .map(|row| predict_row(predictor, row))
        .collect();

    let output = BatchOutput {
        outcomes,
        row_errors: batch.row_errors,
        rows_read: batch.rows_read,
    };

    info!(
        rows = output.rows_read,
        succeeded = output.succeeded(),
        failed = output.failed(),
        refiner = predictor.has_refiner(),
        "batch complete"
    );
    Ok(output)
}

fn predict_row(predictor: &Predictor, row: &HistoryRow) -> BatchOutcome {
    BatchOutcome {
        line: row.line,
        id: row.id.clone(),
        result: predictor.predict(row.period_dates.as_slice(), row.cycle_length_override),
    }
}
