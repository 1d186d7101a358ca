//! Error types with actionable diagnostics.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors propagate
//! immediately: a run that fails partway produces no report and appends no rows.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ValidationError;
use crate::storage::StorageError;

/// Result type alias for housing-monitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the dataset model, the comparator, the report builder and
/// the loader.
#[derive(Error, Debug)]
pub enum Error {
    /// A column name was added twice to the same dataset.
    #[error("Duplicate column '{name}'\n  → Column names must be unique within a dataset")]
    DuplicateColumn { name: String },

    /// A column's length disagrees with the dataset row count.
    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    LengthMismatch { name: String, expected: usize, actual: usize },

    /// A required column is absent.
    #[error("Missing required column '{name}'\n  → Check the upstream cleaning step output")]
    MissingColumn { name: String },

    /// A column held a value of the wrong kind.
    #[error("Column '{name}' is {actual}, expected {expected}")]
    ColumnType { name: String, expected: &'static str, actual: &'static str },

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The drift report artifact could not be persisted.
    #[error("Failed to write drift report to {path}: {message}")]
    ReportWrite { path: PathBuf, message: String },

    /// A persisted drift report could not be parsed.
    #[error("Malformed drift report: {0}")]
    ReportFormat(String),

    /// A statistical test produced a non-finite result.
    #[error("Statistical test failed for column '{column}': {message}")]
    Statistics { column: String, message: String },

    /// Reference table store failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a statistics error for a column.
    pub fn statistics(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statistics { column: column.into(), message: message.into() }
    }

    /// Check if this error is caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateColumn { .. }
                | Self::LengthMismatch { .. }
                | Self::MissingColumn { .. }
                | Self::ColumnType { .. }
                | Self::Csv(_)
                | Self::ReportFormat(_)
                | Self::Config(_)
                | Self::Validation(_)
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateColumn { .. } => "E001",
            Self::LengthMismatch { .. } => "E002",
            Self::MissingColumn { .. } => "E003",
            Self::ColumnType { .. } => "E004",
            Self::Csv(_) => "E010",
            Self::Io { .. } => "E011",
            Self::ReportWrite { .. } => "E012",
            Self::ReportFormat(_) => "E013",
            Self::Statistics { .. } => "E020",
            Self::Storage(_) => "E030",
            Self::Config(_) => "E040",
            Self::Validation(_) => "E041",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            Error::DuplicateColumn { name: "x".into() },
            Error::LengthMismatch { name: "x".into(), expected: 1, actual: 2 },
            Error::MissingColumn { name: "x".into() },
            Error::ColumnType { name: "x".into(), expected: "numeric", actual: "categorical" },
            Error::io("read", std::io::Error::other("boom")),
            Error::ReportWrite { path: "r.csv".into(), message: "denied".into() },
            Error::ReportFormat("bad".into()),
            Error::statistics("x", "nan"),
            Error::Storage(StorageError::TableNotFound("t".into())),
            Error::Config("bad".into()),
            Error::Validation(ValidationError::EmptyTableName),
        ];
        let mut codes: Vec<_> = errors.iter().map(Error::code).collect();
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn test_user_errors() {
        assert!(Error::MissingColumn { name: "year".into() }.is_user_error());
        assert!(Error::Config("bad yaml".into()).is_user_error());
        assert!(!Error::statistics("price", "nan").is_user_error());
        assert!(!Error::Storage(StorageError::Backend("down".into())).is_user_error());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::io("reading batch.csv", std::io::Error::other("permission denied"));
        let msg = err.to_string();
        assert!(msg.contains("reading batch.csv"));
        assert!(msg.contains("permission denied"));

        let err = Error::MissingColumn { name: "n_bedrooms".into() };
        assert!(err.to_string().contains("n_bedrooms"));
    }
}
