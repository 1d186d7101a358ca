//! housing-monitor: incremental listing loads and data drift detection
//!
//! The crate keeps a persisted reference table of housing listings, appends
//! only unseen rows from each new batch, and compares incoming data with the
//! reference column by column.
//!
//! - [`dataset`]: typed tabular model, schema alignment, CSV I/O
//! - [`eval`]: KS and chi-square drift tests, report artifact, alerting
//! - [`storage`]: reference table stores and the incremental loader
//! - [`features`]: raw scrape cleaning, listing validation and feature engineering
//! - [`config`]: YAML configuration and validation
//! - [`pipeline`]: load and drift-check wiring
//!
//! ## Example
//!
//! ```ignore
//! use housing_monitor::{read_csv, Pipeline, PipelineConfig};
//!
//! let mut pipeline = Pipeline::open(PipelineConfig::default())?;
//! pipeline.ingest(&read_csv("listings.csv", None)?)?;
//! let check = pipeline.check_drift(&read_csv("incoming.csv", None)?)?;
//! println!("{} columns drifted", check.decision.drifted_columns);
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod features;
pub mod pipeline;
pub mod storage;

pub use config::{validate_config, PipelineConfig};
pub use dataset::{align, read_csv, write_csv, Column, ColumnType, Dataset, Schema};
pub use error::{Error, Result};
pub use eval::{
    build_report, compare_datasets, AlertDecision, AlertPolicy, DriftConfig, DriftDetector,
    DriftRecord, DriftReport,
};
pub use features::{clean_listings, engineer_features, FeatureConfig};
pub use pipeline::{DriftCheck, Pipeline};
pub use storage::{
    DedupConfig, IncrementalLoader, InMemoryStore, LoadOutcome, SqliteStore, StorageError,
    TableStore,
};
