//! Persisted reference table storage
//!
//! The incremental loader appends new rows to a named table; the drift check
//! reads the same table back as its reference dataset.
//!
//! - `sqlite`: local-first SQLite store (rusqlite, bundled)
//! - `in_memory`: map-backed store for tests and dry runs
//! - `loader`: exact-match deduplicating incremental loader

mod error;
mod in_memory;
pub mod loader;
pub mod sqlite;


pub use error::{StorageError, StorageResult};
pub use in_memory::InMemoryStore;
pub use loader::{DedupConfig, IncrementalLoader, LoadOutcome};
pub use sqlite::SqliteStore;

use crate::dataset::Dataset;

/// Named-table backend holding the reference dataset.
///
/// Implementations never retry failed operations; connectivity errors surface
/// to the caller unchanged.
pub trait TableStore: Send {
    /// Whether `table` has been created
    fn table_exists(&self, table: &str) -> StorageResult<bool>;

    /// Read every row of `table` in insertion order
    fn read_table(&self, table: &str) -> StorageResult<Dataset>;

    /// Append `rows` to `table`, creating it from the rows' schema on first
    /// use. Returns the number of rows written.
    fn append(&mut self, table: &str, rows: &Dataset) -> StorageResult<usize>;

    /// Drop `table` if it exists
    fn reset(&mut self, table: &str) -> StorageResult<()>;
}
