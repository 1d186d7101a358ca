//! Validation error types
//!
//! Defines all validation error variants for pipeline configurations.

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid significance level: {0} (must be > 0.0 and < 1.0)")]
    InvalidSignificance(f64),

    #[error("Invalid epsilon: {0} (must be > 0.0)")]
    InvalidEpsilon(f64),

    #[error("Table name cannot be empty")]
    EmptyTableName,

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Report path cannot be empty")]
    EmptyReportPath,

    #[error("Incoming table name cannot be empty")]
    EmptyIncomingTable,

    #[error("Invalid alert threshold: {0} (must be > 0)")]
    InvalidAlertThreshold(usize),

    #[error("Invalid float decimals: {0} (must be <= 15)")]
    InvalidFloatDecimals(u32),

    #[error("Invalid lease length: {0} (must be > 0)")]
    InvalidLeaseYears(u32),
}
