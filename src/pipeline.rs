//! Task wiring: ingest a batch, check drift against the stored reference.
//!
//! A [`Pipeline`] owns its store and configuration; each run is a plain
//! sequence of steps with no shared state between runs.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{validate_config, PipelineConfig};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::eval::{build_report, AlertDecision, DriftDetector, DriftReport};
use crate::features::{clean_listings, engineer_features};
use crate::storage::{IncrementalLoader, LoadOutcome, SqliteStore, TableStore};

/// Outcome of a drift check
#[derive(Clone, Debug)]
pub struct DriftCheck {
    pub report: DriftReport,
    pub decision: AlertDecision,
    pub report_path: PathBuf,
}

/// Serializable summary of a [`DriftCheck`]
#[derive(Debug, Serialize)]
pub struct DriftCheckSummary<'a> {
    pub report_path: &'a Path,
    pub columns: usize,
    pub drifted_columns: usize,
    pub threshold: usize,
    pub alert: bool,
}

impl DriftCheck {
    pub fn summary(&self) -> DriftCheckSummary<'_> {
        DriftCheckSummary {
            report_path: &self.report_path,
            columns: self.decision.total_columns,
            drifted_columns: self.decision.drifted_columns,
            threshold: self.decision.threshold,
            alert: self.decision.triggered,
        }
    }
}

/// Configured loader, comparator and store
pub struct Pipeline<S: TableStore> {
    config: PipelineConfig,
    store: S,
    loader: IncrementalLoader,
    detector: DriftDetector,
}

impl Pipeline<SqliteStore> {
    /// Validate `config` and open its SQLite database
    pub fn open(config: PipelineConfig) -> Result<Self> {
        validate_config(&config)?;
        let store = SqliteStore::open(&config.storage.database)?;
        Self::with_store(config, store)
    }
}

impl<S: TableStore> Pipeline<S> {
    /// Validate `config` and use an existing store
    pub fn with_store(config: PipelineConfig, store: S) -> Result<Self> {
        validate_config(&config)?;
        let loader = IncrementalLoader::new(config.dedup.clone());
        let detector = DriftDetector::new(config.drift.detector_config());
        Ok(Self { config, store, loader, detector })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn table(&self) -> &str {
        &self.config.storage.table
    }

    /// Drop the reference table
    pub fn reset(&mut self) -> Result<()> {
        let table = self.config.storage.table.clone();
        self.store.reset(&table)?;
        info!(table = %table, "reference table dropped");
        Ok(())
    }

    /// Optionally reset, clean and engineer features, then append the unseen
    /// rows of `batch`.
    pub fn ingest(&mut self, batch: &Dataset) -> Result<LoadOutcome> {
        if self.config.storage.reset_before_load {
            self.reset()?;
        }
        let cleaned = if self.config.features.clean {
            clean_listings(batch)?
        } else {
            batch.clone()
        };
        let prepared = if self.config.features.enabled {
            engineer_features(&self.config.features, &cleaned)?
        } else {
            cleaned
        };
        let table = self.config.storage.table.clone();
        self.loader.load(&mut self.store, &table, &prepared)
    }

    /// Compare `incoming` with the stored reference, write the report and
    /// apply the alert policy.
    pub fn check_drift(&self, incoming: &Dataset) -> Result<DriftCheck> {
        let reference = self.store.read_table(self.table())?;
        let report_path = self.config.drift.report_path.clone();
        let report = build_report(&self.detector, &reference, incoming, &report_path)?;
        let decision = self.config.alert.evaluate(&report);
        if decision.triggered {
            warn!(
                path = %report_path.display(),
                drifted = decision.drifted_columns,
                total = decision.total_columns,
                threshold = decision.threshold,
                "data drift detected"
            );
        }
        Ok(DriftCheck { report, decision, report_path })
    }

    /// Read the incoming batch from `table` in the same store, then run
    /// [`Pipeline::check_drift`] on it.
    pub fn check_drift_table(&self, table: &str) -> Result<DriftCheck> {
        let incoming = self.store.read_table(table)?;
        info!(table, rows = incoming.n_rows(), "incoming batch read from store");
        self.check_drift(&incoming)
    }
}
