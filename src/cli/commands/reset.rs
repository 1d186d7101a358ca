//! Reset command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PipelineConfig;
use crate::pipeline::Pipeline;

pub fn run_reset(config: PipelineConfig, level: LogLevel) -> Result<(), String> {
    let table = config.storage.table.clone();
    let database = config.storage.database.clone();
    let mut pipeline = Pipeline::open(config).map_err(|e| e.to_string())?;
    pipeline.reset().map_err(|e| e.to_string())?;
    log(
        level,
        LogLevel::Normal,
        &format!("Dropped table `{table}` in {}", database.display()),
    );
    Ok(())
}
