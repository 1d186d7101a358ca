//! Drift command implementation

use super::to_json;
use crate::cli::logging::log;
use crate::cli::{DriftArgs, LogLevel, OutputFormat};
use crate::config::PipelineConfig;
use crate::dataset::read_csv;
use crate::eval::DriftRecord;
use crate::pipeline::{DriftCheck, Pipeline};

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

/// One text line per compared column
pub fn format_record(record: &DriftRecord) -> String {
    format!(
        "  {:<24} {:<14} stat={:<10} p={:<8} {}",
        record.column,
        record.test.name(),
        format_value(record.statistic),
        format_value(record.p_value),
        if record.drift_detected { "DRIFT" } else { "ok" }
    )
}

fn json_output(check: &DriftCheck) -> serde_json::Value {
    let records: Vec<serde_json::Value> = check
        .report
        .records()
        .iter()
        .map(|r| {
            serde_json::json!({
                "column": r.column,
                "test": r.test.name(),
                "statistic": r.statistic,
                "p_value": r.p_value,
                "drift_detected": r.drift_detected,
            })
        })
        .collect();
    serde_json::json!({
        "summary": check.summary(),
        "records": records,
    })
}

pub fn run_drift(args: DriftArgs, mut config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    if let Some(output) = args.output {
        config.drift.report_path = output;
    }

    let incoming_table = args.incoming_table.or_else(|| config.drift.incoming_table.clone());
    let check = match (args.input, incoming_table) {
        (Some(input), _) => {
            log(level, LogLevel::Normal, &format!("Checking drift: {}", input.display()));
            let incoming = read_csv(&input, None).map_err(|e| e.to_string())?;
            let pipeline = Pipeline::open(config).map_err(|e| e.to_string())?;
            pipeline.check_drift(&incoming)
        }
        (None, Some(table)) => {
            log(level, LogLevel::Normal, &format!("Checking drift: table `{table}`"));
            let pipeline = Pipeline::open(config).map_err(|e| e.to_string())?;
            pipeline.check_drift_table(&table)
        }
        (None, None) => {
            return Err(
                "No incoming data: pass a CSV, --incoming-table or set drift.incoming_table".to_string()
            );
        }
    }
    .map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Json => println!("{}", to_json(&json_output(&check))?),
        OutputFormat::Text | OutputFormat::Yaml => {
            for record in check.report.records() {
                log(level, LogLevel::Verbose, &format_record(record));
            }
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "  {} of {} columns drifted (alert threshold: {})",
                    check.decision.drifted_columns,
                    check.decision.total_columns,
                    check.decision.threshold
                ),
            );
            log(level, LogLevel::Normal, &format!("  Report: {}", check.report_path.display()));
        }
    }

    if args.fail_on_alert && check.decision.triggered {
        return Err(format!(
            "Drift alert: {} of {} columns drifted (threshold {})",
            check.decision.drifted_columns, check.decision.total_columns, check.decision.threshold
        ));
    }
    Ok(())
}
