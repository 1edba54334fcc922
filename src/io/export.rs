//! Export per-row batch results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Failed rows are written with an empty prediction and the error message.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::BatchOutcome;
use crate::error::AppError;

const HEADER: [&str; 8] = [
    "id",
    "next_period_date",
    "predicted_cycle_length",
    "ovulation_window_start",
    "ovulation_window_end",
    "method",
    "line",
    "error",
];

/// Write batch results to a CSV file.
pub fn write_results_csv(path: &Path, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, outcomes)
}

/// Write batch results as CSV to any sink.
pub fn write_results<W: Write>(sink: W, outcomes: &[BatchOutcome]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(sink);

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for outcome in outcomes {
        let line = outcome.line.to_string();
        let record: [String; 8] = match &outcome.result {
            Ok(r) => [
                outcome.id.clone(),
                r.next_period_date.to_string(),
                r.predicted_cycle_length.to_string(),
                r.ovulation_window.start.to_string(),
                r.ovulation_window.end.to_string(),
                r.method.to_string(),
                line,
                String::new(),
            ],
            Err(e) => [
                outcome.id.clone(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                line,
                e.to_string(),
            ],
        };
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
