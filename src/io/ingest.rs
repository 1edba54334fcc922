//! Batch history CSV ingest.
//!
//! Each row holds one user's history:
//!
//! ```text
//! id,period_dates,cycle_length_override
//! alice,2025-06-01;2025-06-30;2025-07-28,
//! bob,2025-05-03;2025-06-02,30
//! ```
//!
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation**: bad rows are collected, never fatal
//! - Date strings are kept raw here; the predictor validates them so that
//!   malformed dates are reported with the same error as single predictions

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// Separator between dates inside the `period_dates` cell.
pub const DATE_LIST_SEPARATOR: char = ';';

/// One history row ready for prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub line: usize,
    pub id: String,
    pub period_dates: Vec<String>,
    pub cycle_length_override: Option<i64>,
}

/// A row-level error encountered during ingest or prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: usable rows + row errors.
#[derive(Debug, Clone, Default)]
pub struct IngestedBatch {
    pub rows: Vec<HistoryRow>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Open and read a history CSV.
pub fn load_histories(path: &Path) -> Result<IngestedBatch, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_histories(file)
}

/// Read history rows from any CSV source.
pub fn read_histories<R: Read>(source: R) -> Result<IngestedBatch, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for required in ["id", "period_dates"] {
        if !header_map.contains_key(required) {
            return Err(AppError::new(2, format!("Missing required column: `{required}`")));
        }
    }

    let mut batch = IngestedBatch::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based.
        let line = idx + 2;
        batch.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                batch.row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, line) {
            Ok(row) => batch.rows.push(row),
            Err((id, message)) => batch.row_errors.push(RowError { line, id, message }),
        }
    }

    Ok(batch)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    line: usize,
) -> Result<HistoryRow, (Option<String>, String)> {
    let id = get_required(record, header_map, "id").map_err(|e| (None, e))?.to_string();

    let period_dates: Vec<String> = get_optional(record, header_map, "period_dates")
        .map(|cell| {
            cell.split(DATE_LIST_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let cycle_length_override = match get_optional(record, header_map, "cycle_length_override") {
        None => None,
        Some(s) => Some(
            s.parse::<i64>()
                .map_err(|_| (Some(id.clone()), format!("Invalid `cycle_length_override` '{s}'.")))?,
        ),
    };

    Ok(HistoryRow {
        line,
        id,
        period_dates,
        cycle_length_override,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_and_overrides() {
        let csv = "\u{feff}ID,Period_Dates,cycle_length_override\n\
                   alice,2025-06-01;2025-06-30; 2025-07-28,\n\
                   bob,2025-05-03;2025-06-02,30\n";
        let batch = read_histories(csv.as_bytes()).unwrap();

        assert_eq!(batch.rows_read, 2);
        assert!(batch.row_errors.is_empty());
        assert_eq!(
            batch.rows[0],
            HistoryRow {
                line: 2,
                id: "alice".to_string(),
                period_dates: vec![
                    "2025-06-01".to_string(),
                    "2025-06-30".to_string(),
                    "2025-07-28".to_string()
                ],
                cycle_length_override: None,
            }
        );
        assert_eq!(batch.rows[1].cycle_length_override, Some(30));
    }

    #[test]
    fn bad_rows_are_collected() {
        let csv = "id,period_dates,cycle_length_override\n\
                   ,2025-06-01,\n\
                   carol,2025-06-01,abc\n\
                   dave,,\n";
        let batch = read_histories(csv.as_bytes()).unwrap();

        assert_eq!(batch.rows_read, 3);
        assert_eq!(batch.row_errors.len(), 2);
        assert_eq!(batch.row_errors[0].line, 2);
        assert_eq!(batch.row_errors[1].id.as_deref(), Some("carol"));
        // Empty histories are left for the predictor to reject.
        assert_eq!(batch.rows.len(), 1);
        assert!(batch.rows[0].period_dates.is_empty());
    }

    #[test]
    fn missing_columns_are_fatal() {
        let err = read_histories("id,dates\nx,2025-06-01\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("period_dates"));
    }
}
