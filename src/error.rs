//! Error types.
//!
//! - `PredictError`: failures of a single prediction request (client input).
//! - `AppError`: what the `cyc` binary reports, carrying a process exit code.

use thiserror::Error;

/// A prediction request failed before any output was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// No period dates were supplied.
    #[error("period_dates is required (got an empty list)")]
    EmptyHistory,

    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("invalid date '{value}' at position {index}: expected YYYY-MM-DD")]
    MalformedDate { index: usize, value: String },

    /// Date arithmetic left the representable calendar range.
    #[error("projected date is outside the supported calendar range")]
    DateOutOfRange,
}

impl PredictError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::EmptyHistory | PredictError::MalformedDate { .. })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        let exit_code = if err.is_client_error() { 2 } else { 4 };
        AppError::new(exit_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_exit_code_2() {
        let err: AppError = PredictError::EmptyHistory.into();
        assert_eq!(err.exit_code(), 2);

        let err: AppError = PredictError::MalformedDate {
            index: 1,
            value: "nope".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn range_overflow_is_not_a_client_error() {
        let err: AppError = PredictError::DateOutOfRange.into();
        assert_eq!(err.exit_code(), 4);
    }
}
