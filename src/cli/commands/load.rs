//! Load command implementation

use super::to_json;
use crate::cli::logging::log;
use crate::cli::{LoadArgs, LogLevel, OutputFormat};
use crate::config::PipelineConfig;
use crate::dataset::read_csv;
use crate::pipeline::Pipeline;

pub fn run_load(args: LoadArgs, mut config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    if args.reset {
        config.storage.reset_before_load = true;
    }
    if args.no_features {
        config.features.enabled = false;
    }
    if args.raw {
        config.features.clean = true;
    }

    log(level, LogLevel::Normal, &format!("Loading: {}", args.input.display()));
    let batch = read_csv(&args.input, None).map_err(|e| e.to_string())?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  Batch: {} rows, {} columns", batch.n_rows(), batch.n_columns()),
    );

    let mut pipeline = Pipeline::open(config).map_err(|e| e.to_string())?;
    let outcome = pipeline.ingest(&batch).map_err(|e| e.to_string())?;

    match args.format {
        OutputFormat::Json => println!("{}", to_json(&outcome)?),
        OutputFormat::Text | OutputFormat::Yaml => {
            if outcome.first_load {
                log(level, LogLevel::Normal, &format!("  Created table `{}`", outcome.table));
            }
            log(
                level,
                LogLevel::Normal,
                &format!("  {} new unique rows loaded into `{}`", outcome.appended, outcome.table),
            );
        }
    }
    Ok(())
}
