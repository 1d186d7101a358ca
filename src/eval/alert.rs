//! Count-threshold alerting over a persisted drift report.
//!
//! The decision sums the `drift_detected` flags and compares the total to a
//! fixed threshold. No multiple-comparisons correction is applied.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::report::DriftReport;
use crate::error::Result;

/// Alert if at least `min_drifted_columns` columns drifted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    pub min_drifted_columns: usize,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self { min_drifted_columns: 3 }
    }
}

impl AlertPolicy {
    pub fn new(min_drifted_columns: usize) -> Self {
        Self { min_drifted_columns }
    }

    pub fn evaluate(&self, report: &DriftReport) -> AlertDecision {
        let drifted_columns = report.drifted_count();
        AlertDecision {
            drifted_columns,
            total_columns: report.len(),
            threshold: self.min_drifted_columns,
            triggered: drifted_columns >= self.min_drifted_columns,
        }
    }
}

/// Outcome of applying an [`AlertPolicy`] to a report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AlertDecision {
    pub drifted_columns: usize,
    pub total_columns: usize,
    pub threshold: usize,
    pub triggered: bool,
}

/// Evaluate `policy` against a report held in memory.
pub fn evaluate(report: &DriftReport, policy: &AlertPolicy) -> AlertDecision {
    policy.evaluate(report)
}

/// Read the report at `path` and log the decision.
pub fn check_report_file<P: AsRef<Path>>(path: P, policy: &AlertPolicy) -> Result<AlertDecision> {
    let path = path.as_ref();
    let report = DriftReport::read_csv(path)?;
    let decision = policy.evaluate(&report);
    if decision.triggered {
        warn!(
            path = %path.display(),
            drifted = decision.drifted_columns,
            total = decision.total_columns,
            threshold = decision.threshold,
            "data drift detected"
        );
    } else {
        info!(
            path = %path.display(),
            drifted = decision.drifted_columns,
            total = decision.total_columns,
            "drift below alert threshold"
        );
    }
    Ok(decision)
}
