//! Validate command implementation

use super::to_json;
use crate::cli::logging::log;
use crate::cli::{LogLevel, OutputFormat, ValidateArgs};
use crate::config::{validate_config, PipelineConfig};

/// Format the storage section as a string
pub fn format_storage_info(config: &PipelineConfig) -> String {
    format!(
        "  Database: {}\n  Table: {}\n  Reset before load: {}",
        config.storage.database.display(),
        config.storage.table,
        config.storage.reset_before_load
    )
}

/// Format the drift and alert sections as a string
pub fn format_drift_info(config: &PipelineConfig) -> String {
    let mut lines = vec![
        format!("  Significance: {}", config.drift.significance),
        format!("  Categorical test: {:?}", config.drift.categorical_test),
        format!("  Report: {}", config.drift.report_path.display()),
        format!("  Alert threshold: {} columns", config.alert.min_drifted_columns),
    ];
    if let Some(decimals) = config.dedup.float_decimals {
        lines.push(format!("  Dedup rounding: {decimals} decimals"));
    }
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    match args.format {
        OutputFormat::Json => println!("{}", to_json(&config)?),
        OutputFormat::Yaml => println!("{}", config.to_yaml().map_err(|e| e.to_string())?),
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration is valid");
            log(level, LogLevel::Normal, &format_storage_info(&config));
            log(level, LogLevel::Verbose, &format_drift_info(&config));
        }
    }
    Ok(())
}
