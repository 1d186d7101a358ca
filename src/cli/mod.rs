//! CLI module for housing-monitor
//!
//! This module contains the argument types, command handlers and output
//! utilities.

mod args;
mod commands;
mod logging;

pub use args::{AlertArgs, Cli, Command, DriftArgs, LoadArgs, OutputFormat, ValidateArgs};
pub use commands::run_command;
pub use logging::LogLevel;
