//! SQLite store core implementation.

use std::borrow::Cow;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};

use super::schema::{create_table_sql, init_connection, insert_sql, quote_ident, table_schema, ROW_ID};
use crate::dataset::{Column, ColumnData, Dataset, Schema, Value};
use crate::storage::{StorageError, StorageResult, TableStore};

/// SQLite-backed reference table store
#[derive(Debug)]
pub struct SqliteStore {
    path: String,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file (use ":memory:" for in-memory)
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            StorageError::Backend(format!("Failed to open database {path_str}: {e}"))
        })?;
        init_connection(&conn)?;
        Ok(Self { path: path_str, conn: Mutex::new(conn) })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open(":memory:")
    }

    /// Get the database path
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn lock_conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Backend(format!("Failed to acquire connection lock: {e}")))
    }

    /// Number of rows currently stored in `table`
    pub fn row_count(&self, table: &str) -> StorageResult<usize> {
        let conn = self.lock_conn()?;
        if !exists(&conn, table)? {
            return Err(StorageError::TableNotFound(table.to_string()));
        }
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", quote_ident(table)), [], |row| row.get(0))
            .map_err(|e| StorageError::Backend(format!("Failed to count rows: {e}")))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [table],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::Backend(format!("Failed to check table: {e}")))
}

/// Cast the columns of `rows` to the types declared by the table
fn cast_to_schema(rows: &Dataset, schema: &Schema) -> StorageResult<Dataset> {
    let mut rows = rows.clone();
    for field in schema.fields() {
        if rows.column(&field.name).is_some() {
            rows.cast_column(&field.name, field.column_type)
                .map_err(|e| StorageError::Backend(format!("Failed to cast column: {e}")))?;
        }
    }
    Ok(rows)
}

fn to_sql(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Number(x) => SqlValue::Real(x),
        Value::Text(s) => SqlValue::Text(s),
    }
}

impl TableStore for SqliteStore {
    fn table_exists(&self, table: &str) -> StorageResult<bool> {
        let conn = self.lock_conn()?;
        exists(&conn, table)
    }

    fn read_table(&self, table: &str) -> StorageResult<Dataset> {
        let conn = self.lock_conn()?;
        if !exists(&conn, table)? {
            return Err(StorageError::TableNotFound(table.to_string()));
        }
        let schema = table_schema(&conn, table)?;
        if schema.is_empty() {
            return Ok(Dataset::new());
        }

        let select: Vec<String> = schema.names().map(quote_ident).collect();
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            select.join(", "),
            quote_ident(table),
            quote_ident(ROW_ID)
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StorageError::Backend(format!("Failed to prepare query: {e}")))?;

        let mut data: Vec<ColumnData> =
            schema.fields().iter().map(|f| ColumnData::nulls(f.column_type, 0)).collect();
        let mut rows = stmt
            .query([])
            .map_err(|e| StorageError::Backend(format!("Failed to query table: {e}")))?;
        while let Some(row) = rows
            .next()
            .map_err(|e| StorageError::Backend(format!("Failed to read row: {e}")))?
        {
            for (i, column) in data.iter_mut().enumerate() {
                match column {
                    ColumnData::Numeric(values) => values.push(row.get::<_, Option<f64>>(i)?),
                    ColumnData::Categorical(values) => {
                        let value = match row.get::<_, SqlValue>(i)? {
                            SqlValue::Null => None,
                            SqlValue::Text(s) => Some(s),
                            SqlValue::Integer(n) => Some(n.to_string()),
                            SqlValue::Real(x) => Some(x.to_string()),
                            SqlValue::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
                        };
                        values.push(value);
                    }
                }
            }
        }

        let columns = schema
            .fields()
            .iter()
            .zip(data)
            .map(|(f, d)| Column::new(f.name.clone(), d))
            .collect();
        Dataset::from_columns(columns)
            .map_err(|e| StorageError::Backend(format!("Failed to assemble table '{table}': {e}")))
    }

    fn append(&mut self, table: &str, rows: &Dataset) -> StorageResult<usize> {
        if rows.n_columns() == 0 {
            return Ok(0);
        }
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let rows = if exists(&tx, table)? {
            let existing = table_schema(&tx, table)?;
            if let Some(extra) = rows.column_names().into_iter().find(|n| !existing.contains(n)) {
                return Err(StorageError::SchemaMismatch(format!(
                    "table '{table}' has no column '{extra}'"
                )));
            }
            Cow::Owned(cast_to_schema(rows, &existing)?)
        } else {
            tx.execute(&create_table_sql(table, &rows.schema()), [])
                .map_err(|e| StorageError::Backend(format!("Failed to create table: {e}")))?;
            Cow::Borrowed(rows)
        };

        {
            let names = rows.column_names();
            let mut stmt = tx
                .prepare(&insert_sql(table, &names))
                .map_err(|e| StorageError::Backend(format!("Failed to prepare insert: {e}")))?;
            for row in 0..rows.n_rows() {
                let values = rows.row_values(row).into_iter().map(to_sql);
                stmt.execute(params_from_iter(values))
                    .map_err(|e| StorageError::Backend(format!("Failed to insert row {row}: {e}")))?;
            }
        }

        tx.commit()?;
        Ok(rows.n_rows())
    }

    fn reset(&mut self, table: &str) -> StorageResult<()> {
        let conn = self.lock_conn()?;
        conn.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), [])
            .map_err(|e| StorageError::Backend(format!("Failed to drop table: {e}")))?;
        Ok(())
    }
}
