//! Configuration validation logic
//!
//! Validates pipeline configurations before any data is touched.

use super::error::ValidationError;
use crate::config::schema::PipelineConfig;

/// Largest rounding precision that still distinguishes f64 values
const MAX_FLOAT_DECIMALS: u32 = 15;

/// Validate a pipeline configuration
///
/// Checks:
/// - Numeric values are in valid ranges
/// - Names and paths are non-empty
pub fn validate_config(config: &PipelineConfig) -> Result<(), ValidationError> {
    if config.storage.table.trim().is_empty() {
        return Err(ValidationError::EmptyTableName);
    }

    if config.storage.database.as_os_str().is_empty() {
        return Err(ValidationError::EmptyDatabasePath);
    }

    // NaN fails both comparisons
    let significance = config.drift.significance;
    if !(significance > 0.0 && significance < 1.0) {
        return Err(ValidationError::InvalidSignificance(significance));
    }

    let epsilon = config.drift.epsilon;
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(ValidationError::InvalidEpsilon(epsilon));
    }

    if config.drift.report_path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyReportPath);
    }

    if config.drift.incoming_table.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ValidationError::EmptyIncomingTable);
    }

    if config.alert.min_drifted_columns == 0 {
        return Err(ValidationError::InvalidAlertThreshold(0));
    }

    if let Some(decimals) = config.dedup.float_decimals {
        if decimals > MAX_FLOAT_DECIMALS {
            return Err(ValidationError::InvalidFloatDecimals(decimals));
        }
    }

    if config.features.lease_years == 0 {
        return Err(ValidationError::InvalidLeaseYears(0));
    }

    Ok(())
}
