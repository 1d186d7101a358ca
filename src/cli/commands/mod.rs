//! CLI command implementations

mod alert;
mod drift;
mod load;
mod reset;
mod validate;


use crate::cli::{Cli, Command, LogLevel};
use crate::config::PipelineConfig;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);
    let config = PipelineConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    match cli.command {
        Command::Load(args) => load::run_load(args, config, log_level),
        Command::Drift(args) => drift::run_drift(args, config, log_level),
        Command::Alert(args) => alert::run_alert(args, config, log_level),
        Command::Reset => reset::run_reset(config, log_level),
        Command::Validate(args) => validate::run_validate(args, config, log_level),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize output: {e}"))
}
