//! housing-monitor CLI
//!
//! # Usage
//!
//! ```bash
//! # Append the unseen rows of a cleaned batch
//! housing-monitor --config pipeline.yaml load cleaned.csv
//!
//! # Compare incoming data with the reference table
//! housing-monitor --config pipeline.yaml drift incoming.csv
//!
//! # Apply the alert threshold to the last report
//! housing-monitor alert --report drift_report.csv --threshold 3 --fail-on-alert
//! ```

use std::process::ExitCode;

use clap::Parser;
use housing_monitor::cli::{run_command, Cli, LogLevel};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = LogLevel::from_flags(cli.verbose, cli.quiet);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| level.filter_directive().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
