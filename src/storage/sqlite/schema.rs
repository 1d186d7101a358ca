//! SQLite table definitions and identifier handling.

use rusqlite::Connection;

use crate::dataset::{ColumnType, Field, Schema};

/// Identity column added to every reference table
pub const ROW_ID: &str = "_row_id";

/// Configure the connection for a single local writer.
pub fn init_connection(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;
         PRAGMA temp_store = MEMORY;",
    )
}

/// Quote an identifier for use in SQL text
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Declared SQL type for a column type
pub fn sql_type(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Numeric => "REAL",
        ColumnType::Categorical => "TEXT",
    }
}

/// Column type recovered from a declared SQL type.
///
/// Follows SQLite affinity rules: anything with REAL, FLOA, DOUB or INT
/// affinity reads back as numeric.
pub fn column_type_of(declared: &str) -> ColumnType {
    let upper = declared.to_ascii_uppercase();
    if ["REAL", "FLOA", "DOUB", "INT", "NUMERIC"].iter().any(|t| upper.contains(t)) {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    }
}

/// `CREATE TABLE` statement for `schema`
pub fn create_table_sql(table: &str, schema: &Schema) -> String {
    let mut columns = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quote_ident(ROW_ID))];
    columns.extend(
        schema
            .fields()
            .iter()
            .map(|f| format!("{} {}", quote_ident(&f.name), sql_type(f.column_type))),
    );
    format!("CREATE TABLE IF NOT EXISTS {} ({})", quote_ident(table), columns.join(", "))
}

/// `INSERT` statement with one positional parameter per field
pub fn insert_sql(table: &str, names: &[&str]) -> String {
    let columns: Vec<String> = names.iter().map(|n| quote_ident(n)).collect();
    let params: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        columns.join(", "),
        params.join(", ")
    )
}

/// Declared user columns of `table`, excluding the identity column
pub fn table_schema(conn: &Connection, table: &str) -> Result<Schema, rusqlite::Error> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
    let rows = stmt.query_map([], |row| {
        let name: String = row.get(1)?;
        let declared: String = row.get(2)?;
        Ok((name, declared))
    })?;

    let mut fields = Vec::new();
    for row in rows {
        let (name, declared) = row?;
        if name != ROW_ID {
            fields.push(Field::new(name, column_type_of(&declared)));
        }
    }
    Ok(Schema::new(fields))
}
