//! Type definitions for drift detection.

use serde::{Deserialize, Serialize};

/// How categorical columns are compared
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalTest {
    /// Reference counts are observed, rescaled incoming counts are expected.
    /// Not symmetric: swapping the datasets changes the result.
    #[default]
    GoodnessOfFit,
    /// Symmetric 2×k contingency-table test of two independent samples
    Contingency,
}

/// Comparator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// A column drifts when its p-value is below this
    pub significance: f64,
    /// Categorical test variant
    pub categorical_test: CategoricalTest,
    /// Substituted for zero expected counts
    pub epsilon: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self { significance: 0.05, categorical_test: CategoricalTest::GoodnessOfFit, epsilon: 1e-8 }
    }
}

/// Statistical test applied to a column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestKind {
    /// Two-sample Kolmogorov-Smirnov (continuous columns)
    KolmogorovSmirnov,
    /// Chi-square goodness of fit (categorical columns)
    ChiSquare,
    /// Chi-square test of independence (categorical columns, opt-in)
    ChiSquareContingency,
}

impl TestKind {
    /// Name written to the report artifact
    pub fn name(&self) -> &'static str {
        match self {
            TestKind::KolmogorovSmirnov => "KS-test",
            TestKind::ChiSquare => "Chi-square",
            TestKind::ChiSquareContingency => "Chi-square-contingency",
        }
    }

    /// Parse a report artifact test name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "KS-test" => Some(TestKind::KolmogorovSmirnov),
            "Chi-square" => Some(TestKind::ChiSquare),
            "Chi-square-contingency" => Some(TestKind::ChiSquareContingency),
            _ => None,
        }
    }
}

/// Whether a record carries a test result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftStatus {
    Evaluated,
    /// Too few observations to run the test
    InsufficientData,
}

/// Per-column comparison result. Statistic and p-value are rounded to four
/// decimal places.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftRecord {
    pub column: String,
    pub test: TestKind,
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub drift_detected: bool,
}

impl DriftRecord {
    /// Record for a column that could not be tested
    pub fn insufficient(column: impl Into<String>, test: TestKind) -> Self {
        Self { column: column.into(), test, statistic: None, p_value: None, drift_detected: false }
    }

    pub fn status(&self) -> DriftStatus {
        if self.p_value.is_some() {
            DriftStatus::Evaluated
        } else {
            DriftStatus::InsufficientData
        }
    }
}

/// Summary of drift results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftSummary {
    /// Total number of columns compared
    pub total_columns: usize,
    /// Columns with detected drift
    pub drifted_columns: usize,
    /// Columns skipped for lack of data
    pub insufficient_columns: usize,
}

impl DriftSummary {
    pub fn from_records(records: &[DriftRecord]) -> Self {
        Self {
            total_columns: records.len(),
            drifted_columns: records.iter().filter(|r| r.drift_detected).count(),
            insufficient_columns: records
                .iter()
                .filter(|r| r.status() == DriftStatus::InsufficientData)
                .count(),
        }
    }

    /// Whether any drift was detected
    pub fn has_drift(&self) -> bool {
        self.drifted_columns > 0
    }

    /// Percentage of columns that drifted
    pub fn drift_percentage(&self) -> f64 {
        if self.total_columns == 0 {
            0.0
        } else {
            100.0 * self.drifted_columns as f64 / self.total_columns as f64
        }
    }
}
