//! CLI argument types - Cli, Command, and per-command argument structs

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// housing-monitor: incremental listing loads and data drift checks
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "housing-monitor")]
#[command(version)]
#[command(about = "Incremental housing listing loader with distributional drift detection")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline configuration file (YAML); defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Append the unseen rows of a listing CSV to the reference table
    Load(LoadArgs),

    /// Compare a CSV against the reference table and write the drift report
    Drift(DriftArgs),

    /// Apply the alert threshold to a persisted drift report
    Alert(AlertArgs),

    /// Drop the reference table
    Reset,

    /// Validate the configuration without touching any data
    Validate(ValidateArgs),
}

/// Arguments for the load command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LoadArgs {
    /// Cleaned listing CSV
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Drop the reference table before loading
    #[arg(long)]
    pub reset: bool,

    /// Load the batch as-is, skipping feature engineering
    #[arg(long)]
    pub no_features: bool,

    /// Clean raw scrape text before feature engineering
    #[arg(long)]
    pub raw: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DriftArgs {
    /// Incoming data CSV
    #[arg(value_name = "CSV", conflicts_with = "incoming_table")]
    pub input: Option<PathBuf>,

    /// Read the incoming batch from this table (overrides `drift.incoming_table`)
    #[arg(long, value_name = "NAME")]
    pub incoming_table: Option<String>,

    /// Report destination (overrides `drift.report_path`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with an error when the alert threshold is reached
    #[arg(long)]
    pub fail_on_alert: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the alert command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AlertArgs {
    /// Drift report CSV (defaults to `drift.report_path`)
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Minimum drifted columns (overrides `alert.min_drifted_columns`)
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Exit with an error when the alert threshold is reached
    #[arg(long)]
    pub fail_on_alert: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json, yaml")),
        }
    }
}
