//! In-memory table store implementation

use std::collections::HashMap;

use super::error::{StorageError, StorageResult};
use super::TableStore;
use crate::dataset::Dataset;

/// In-memory table store (no persistence)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(crate) tables: HashMap<String, Dataset>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self { tables: HashMap::new() }
    }

    /// Names of the tables currently held
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TableStore for InMemoryStore {
    fn table_exists(&self, table: &str) -> StorageResult<bool> {
        Ok(self.tables.contains_key(table))
    }

    fn read_table(&self, table: &str) -> StorageResult<Dataset> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))
    }

    fn append(&mut self, table: &str, rows: &Dataset) -> StorageResult<usize> {
        if rows.n_columns() == 0 {
            return Ok(0);
        }
        match self.tables.get_mut(table) {
            Some(existing) => {
                if let Some(extra) = rows.column_names().into_iter().find(|n| existing.column(n).is_none()) {
                    return Err(StorageError::SchemaMismatch(format!(
                        "table '{table}' has no column '{extra}'"
                    )));
                }
                existing.append_rows(rows);
            }
            None => {
                self.tables.insert(table.to_string(), rows.clone());
            }
        }
        Ok(rows.n_rows())
    }

    fn reset(&mut self, table: &str) -> StorageResult<()> {
        self.tables.remove(table);
        Ok(())
    }
}
