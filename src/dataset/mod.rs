//! Tabular Data Model
//!
//! Explicitly typed, column-oriented datasets exchanged between the loader,
//! the store and the drift comparator.
//!
//! - `types`: schema, type tags and cell values
//! - `column`: homogeneous column storage and casting
//! - `frame`: the [`Dataset`] container
//! - `key`: exact row identity used for deduplication
//! - `align`: reference/incoming schema alignment
//! - `csv_io`: CSV ingestion and export

mod align;
mod column;
mod csv_io;
mod frame;
mod key;
mod types;


pub use align::align;
pub use column::{Column, ColumnData};
pub use csv_io::{read_csv, read_csv_from, write_csv, write_csv_to};
pub use frame::Dataset;
pub use key::RowKey;
pub use types::{ColumnType, Field, Schema, Value};
