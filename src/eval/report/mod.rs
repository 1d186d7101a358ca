//! Drift Report Builder
//!
//! Aligns the reference and incoming datasets, runs the comparator over every
//! shared column in reference order, and persists the records as a flat CSV
//! artifact. Either every shared column is reported or, on error, nothing is
//! written.

mod artifact;


use std::path::Path;

use tracing::info;

use crate::dataset::{align, Dataset};
use crate::error::Result;
use crate::eval::drift::{DriftDetector, DriftRecord, DriftSummary};

/// Ordered per-column drift records
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriftReport {
    records: Vec<DriftRecord>,
}

impl DriftReport {
    pub fn new(records: Vec<DriftRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DriftRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for `column`, if it was compared
    pub fn get(&self, column: &str) -> Option<&DriftRecord> {
        self.records.iter().find(|r| r.column == column)
    }

    /// Number of columns flagged as drifted
    pub fn drifted_count(&self) -> usize {
        self.records.iter().filter(|r| r.drift_detected).count()
    }

    pub fn summary(&self) -> DriftSummary {
        DriftSummary::from_records(&self.records)
    }

    pub fn into_records(self) -> Vec<DriftRecord> {
        self.records
    }
}

/// Compare every shared column without persisting anything.
pub fn compare_datasets(
    detector: &DriftDetector,
    reference: &Dataset,
    incoming: &Dataset,
) -> Result<DriftReport> {
    let (reference, incoming) = align(reference, incoming)?;
    let records = reference
        .columns()
        .iter()
        .zip(incoming.columns())
        .map(|(r, i)| detector.compare_column(r, i))
        .collect::<Result<Vec<_>>>()?;
    Ok(DriftReport::new(records))
}

/// Build the drift report and write it to `output`, overwriting any previous
/// artifact. Write failures are returned to the caller.
pub fn build_report<P: AsRef<Path>>(
    detector: &DriftDetector,
    reference: &Dataset,
    incoming: &Dataset,
    output: P,
) -> Result<DriftReport> {
    let report = compare_datasets(detector, reference, incoming)?;
    report.write_csv(output.as_ref())?;
    info!(
        path = %output.as_ref().display(),
        columns = report.len(),
        drifted = report.drifted_count(),
        "drift report saved"
    );
    Ok(report)
}
