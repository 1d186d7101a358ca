//! Alert command implementation

use super::to_json;
use crate::cli::logging::log;
use crate::cli::{AlertArgs, LogLevel, OutputFormat};
use crate::config::{validate_config, PipelineConfig};
use crate::eval::check_report_file;

pub fn run_alert(args: AlertArgs, mut config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    if let Some(threshold) = args.threshold {
        config.alert.min_drifted_columns = threshold;
    }
    validate_config(&config).map_err(|e| e.to_string())?;
    let report = args.report.unwrap_or_else(|| config.drift.report_path.clone());

    let decision = check_report_file(&report, &config.alert).map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Json => println!("{}", to_json(&decision)?),
        OutputFormat::Text | OutputFormat::Yaml => {
            if decision.triggered {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "DRIFT ALERT: {} columns out of {} showed significant data drift",
                        decision.drifted_columns, decision.total_columns
                    ),
                );
                log(level, LogLevel::Normal, &format!("  Report: {}", report.display()));
            } else {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "No alert triggered. Only {} drifted columns (threshold: {})",
                        decision.drifted_columns, decision.threshold
                    ),
                );
            }
        }
    }

    if args.fail_on_alert && decision.triggered {
        return Err(format!(
            "Drift alert: {} of {} columns drifted (threshold {})",
            decision.drifted_columns, decision.total_columns, decision.threshold
        ));
    }
    Ok(())
}
