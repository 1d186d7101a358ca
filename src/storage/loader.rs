//! Incremental Loader
//!
//! Appends only the rows of a new batch that are not already present in the
//! persisted table, by exact value match on the columns both share.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::TableStore;
use crate::dataset::{Dataset, RowKey};
use crate::error::Result;

/// Row identity settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Round numeric cells to this many decimals before comparing.
    /// `None` compares exact values.
    pub float_decimals: Option<u32>,
}

/// Result of one load
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub table: String,
    /// Rows written
    pub appended: usize,
    /// True when the table did not exist before this load
    pub first_load: bool,
}

/// Exact-match deduplicating loader
#[derive(Clone, Debug, Default)]
pub struct IncrementalLoader {
    dedup: DedupConfig,
}

impl IncrementalLoader {
    pub fn new(dedup: DedupConfig) -> Self {
        Self { dedup }
    }

    pub fn dedup(&self) -> &DedupConfig {
        &self.dedup
    }

    /// Rows of `batch` to append given the `existing` table contents.
    ///
    /// With no existing table the whole batch is the delta. Otherwise rows are
    /// compared on the common columns (batch order, existing types) and a
    /// batch row is kept only if its key occurs exactly once across existing
    /// and batch rows together. A row repeated within the batch is therefore
    /// never kept once the table exists.
    pub fn load_delta(&self, existing: Option<&Dataset>, batch: &Dataset) -> Result<Dataset> {
        let Some(existing) = existing else {
            return Ok(batch.clone());
        };

        let common = batch.schema().intersection(&existing.schema());
        if common.is_empty() {
            warn!(
                batch_columns = batch.n_columns(),
                table_columns = existing.n_columns(),
                "batch shares no columns with the existing table, nothing to load"
            );
            return Ok(batch.take(&[]));
        }

        let existing = existing.select(&common)?;
        let mut candidate = batch.select(&common)?;
        for column in existing.columns() {
            candidate.cast_column(column.name(), column.column_type())?;
        }

        let decimals = self.dedup.float_decimals;
        let mut occurrences: HashMap<RowKey, usize> =
            HashMap::with_capacity(existing.n_rows() + candidate.n_rows());
        for row in 0..existing.n_rows() {
            *occurrences.entry(existing.row_key(row, decimals)).or_insert(0) += 1;
        }
        let keys: Vec<RowKey> =
            (0..candidate.n_rows()).map(|row| candidate.row_key(row, decimals)).collect();
        for key in &keys {
            *occurrences.entry(key.clone()).or_insert(0) += 1;
        }

        let fresh: Vec<usize> = keys
            .iter()
            .enumerate()
            .filter(|(_, key)| occurrences.get(*key) == Some(&1))
            .map(|(row, _)| row)
            .collect();
        Ok(candidate.take(&fresh))
    }

    /// Append a computed delta, skipping the write when it is empty.
    pub fn append<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        table: &str,
        delta: &Dataset,
    ) -> Result<usize> {
        if delta.n_rows() == 0 {
            info!(table, "no new unique rows to load");
            return Ok(0);
        }
        let written = store.append(table, delta)?;
        info!(table, rows = written, "{written} new unique rows loaded into `{table}`");
        Ok(written)
    }

    /// Read the current table, compute the delta against `batch` and append it.
    pub fn load<S: TableStore + ?Sized>(
        &self,
        store: &mut S,
        table: &str,
        batch: &Dataset,
    ) -> Result<LoadOutcome> {
        let existing = if store.table_exists(table)? { Some(store.read_table(table)?) } else { None };
        let first_load = existing.is_none();
        let delta = self.load_delta(existing.as_ref(), batch)?;
        let appended = self.append(store, table, &delta)?;
        Ok(LoadOutcome { table: table.to_string(), appended, first_load })
    }
}
