//! Pipeline configuration
//!
//! YAML configuration with defaults for every field, plus range validation.

mod schema;
mod validate;

pub use schema::{DriftSection, PipelineConfig, StorageConfig};
pub use validate::{validate_config, ValidationError};
