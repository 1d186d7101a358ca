//! Storage error types

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Schema mismatch: {0}\n  → Reset the table or align the batch columns with it")]
    SchemaMismatch(String),
}
