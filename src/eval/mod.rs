//! Drift evaluation
//!
//! - `drift`: per-column distribution comparison (KS, chi-square)
//! - `report`: aligned dataset comparison and the persisted CSV artifact
//! - `alert`: count-threshold decision over a report

pub mod alert;
pub mod drift;
pub mod report;

pub use alert::{check_report_file, AlertDecision, AlertPolicy};
pub use drift::{
    CategoricalTest, DriftConfig, DriftDetector, DriftRecord, DriftStatus, DriftSummary, TestKind,
};
pub use report::{build_report, compare_datasets, DriftReport};
