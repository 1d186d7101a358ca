//! SQLite reference table store
//!
//! Local-first storage using bundled SQLite with WAL mode. Each table carries
//! an `_row_id` identity key so reads return rows in insertion order.
//!
//! # Example
//!
//! ```ignore
//! use housing_monitor::storage::{SqliteStore, TableStore};
//!
//! let mut store = SqliteStore::open("./housing.db")?;
//! store.append("housing_data", &batch)?;
//! let reference = store.read_table("housing_data")?;
//! ```

pub(crate) mod schema;
mod store;

pub use store::SqliteStore;
