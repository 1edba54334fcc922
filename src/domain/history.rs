//! Validated period start dates.
//!
//! Callers hand the engine raw `YYYY-MM-DD` strings. Parsing produces an owned,
//! calendar-sorted copy so the estimator and predictor never depend on input
//! order and never touch the caller's data.

use chrono::NaiveDate;

use crate::error::PredictError;

/// Accepted input date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Historical period start dates, sorted ascending. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodHistory {
    dates: Vec<NaiveDate>,
}

impl PeriodHistory {
    /// Build a history from already-parsed dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
        dates.sort_unstable();
        Self { dates }
    }

    /// Parse raw date strings.
    ///
    /// Fails on the first entry (in input order) that is not a valid
    /// `YYYY-MM-DD` calendar date. Surrounding whitespace is ignored.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self, PredictError> {
        let dates = raw
            .iter()
            .enumerate()
            .map(|(index, s)| {
                parse_date(s.as_ref()).ok_or_else(|| PredictError::MalformedDate {
                    index,
                    value: s.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_dates(dates))
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of distinct calendar dates.
    pub fn distinct_count(&self) -> usize {
        // Sorted, so duplicates are adjacent.
        let mut n = 0;
        let mut prev: Option<NaiveDate> = None;
        for &d in &self.dates {
            if prev != Some(d) {
                n += 1;
                prev = Some(d);
            }
        }
        n
    }

    /// Most recent period start.
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Day gaps between consecutive dates (calendar order).
    pub fn deltas(&self) -> Vec<i64> {
        self.dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect()
    }
}

/// Strict `YYYY-MM-DD` parse.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // chrono's `%Y` accepts signed and short years; require `dddd-dd-dd`.
    if !has_iso_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn has_iso_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}
