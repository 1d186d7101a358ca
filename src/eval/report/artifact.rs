//! Flat CSV artifact for drift reports.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::DriftReport;
use crate::error::{Error, Result};
use crate::eval::drift::{DriftRecord, TestKind};

/// One artifact line: `column,test,statistic,p_value,drift_detected`
#[derive(Debug, Serialize, Deserialize)]
struct ReportRow {
    column: String,
    test: String,
    statistic: Option<f64>,
    p_value: Option<f64>,
    #[serde(deserialize_with = "deserialize_bool_lenient")]
    drift_detected: bool,
}

/// Accept `true`/`false` in any case, as written by dataframe tools.
fn deserialize_bool_lenient<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!("expected 'true' or 'false', got '{other}'"))),
    }
}

impl From<&DriftRecord> for ReportRow {
    fn from(record: &DriftRecord) -> Self {
        Self {
            column: record.column.clone(),
            test: record.test.name().to_string(),
            statistic: record.statistic,
            p_value: record.p_value,
            drift_detected: record.drift_detected,
        }
    }
}

impl TryFrom<ReportRow> for DriftRecord {
    type Error = Error;

    fn try_from(row: ReportRow) -> Result<Self> {
        let test = TestKind::from_name(&row.test).ok_or_else(|| {
            Error::ReportFormat(format!("unknown test '{}' for column '{}'", row.test, row.column))
        })?;
        Ok(DriftRecord {
            column: row.column,
            test,
            statistic: row.statistic,
            p_value: row.p_value,
            drift_detected: row.drift_detected,
        })
    }
}

impl DriftReport {
    /// Serialize to any writer. The header is written even for an empty report.
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
        wtr.write_record(["column", "test", "statistic", "p_value", "drift_detected"])?;
        for record in self.records() {
            wtr.serialize(ReportRow::from(record))?;
        }
        wtr.flush().map_err(|e| Error::io("flushing drift report", e))?;
        Ok(())
    }

    /// Persist to `path`, replacing any previous report.
    ///
    /// The report is written to a temporary file in the destination directory
    /// and renamed into place, so readers never observe a partial file.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let write_err = |message: String| Error::ReportWrite { path: path.to_path_buf(), message };

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(|e| write_err(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
        self.write_csv_to(&mut tmp)?;
        tmp.as_file().sync_all().map_err(|e| write_err(e.to_string()))?;
        tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;
        Ok(())
    }

    /// Parse a report from any reader
    pub fn read_csv_from<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let records = rdr
            .deserialize::<ReportRow>()
            .map(|row| DriftRecord::try_from(row?))
            .collect::<Result<Vec<_>>>()?;
        Ok(DriftReport::new(records))
    }

    /// Read a persisted report
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)
            .map_err(|e| Error::io(format!("opening drift report {}", path.display()), e))?;
        Self::read_csv_from(file)
    }
}
