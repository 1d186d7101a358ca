//! CSV ingestion and export.
//!
//! Column types are decided here, once: either from an explicit [`Schema`] or
//! by inference (a column is numeric iff every non-missing cell parses as a
//! number).

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use super::column::{Column, ColumnData};
use super::frame::Dataset;
use super::types::{ColumnType, Schema};
use crate::error::{Error, Result};

/// Cell spellings read as missing values
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// Read a CSV file with a header row
pub fn read_csv<P: AsRef<Path>>(path: P, schema: Option<&Schema>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(format!("opening {}", path.display()), e))?;
    read_csv_from(file, schema)
}

/// Read CSV from any reader. Fields listed in `schema` take its declared type;
/// other columns are inferred.
pub fn read_csv_from<R: Read>(reader: R, schema: Option<&Schema>) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(false).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (i, cell) in record.iter().enumerate() {
            raw[i].push(cell.to_string());
        }
    }

    let mut dataset = Dataset::new();
    for (name, cells) in headers.into_iter().zip(raw) {
        let declared = schema.and_then(|s| s.column_type(&name));
        let column_type = declared.unwrap_or_else(|| infer_type(&cells));
        let data = match column_type {
            ColumnType::Numeric => ColumnData::Numeric(parse_numeric(&name, &cells)?),
            ColumnType::Categorical => ColumnData::Categorical(
                cells
                    .into_iter()
                    .map(|c| if is_missing(&c) { None } else { Some(c) })
                    .collect(),
            ),
        };
        dataset.push_column(Column::new(name, data))?;
    }
    Ok(dataset)
}

fn infer_type(cells: &[String]) -> ColumnType {
    let mut seen_value = false;
    for cell in cells.iter().filter(|c| !is_missing(c)) {
        if cell.trim().parse::<f64>().is_err() {
            return ColumnType::Categorical;
        }
        seen_value = true;
    }
    // An all-missing column carries no type evidence
    if seen_value {
        ColumnType::Numeric
    } else {
        ColumnType::Categorical
    }
}

fn parse_numeric(name: &str, cells: &[String]) -> Result<Vec<Option<f64>>> {
    cells
        .iter()
        .map(|c| {
            if is_missing(c) {
                Ok(None)
            } else {
                c.trim().parse::<f64>().map(Some).map_err(|_| Error::ColumnType {
                    name: name.to_string(),
                    expected: ColumnType::Numeric.name(),
                    actual: ColumnType::Categorical.name(),
                })
            }
        })
        .collect()
}

/// Write a dataset as CSV with a header row; missing cells are empty.
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).map_err(|e| Error::io(format!("creating {}", path.display()), e))?;
    write_csv_to(dataset, file)
}

/// Write CSV to any writer
pub fn write_csv_to<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.column_names())?;
    for row in 0..dataset.n_rows() {
        let cells: Vec<String> = dataset
            .row_values(row)
            .into_iter()
            .map(|v| match v {
                super::Value::Null => String::new(),
                super::Value::Number(x) => x.to_string(),
                super::Value::Text(s) => s,
            })
            .collect();
        wtr.write_record(&cells)?;
    }
    wtr.flush().map_err(|e| Error::io("flushing CSV output", e))?;
    Ok(())
}
