//! Drift detector implementation.

use tracing::debug;

use super::statistical::{
    align_counts, chi_square_contingency, chi_square_goodness_of_fit, ks_two_sample,
    rescale_expected, round4, value_counts,
};
use super::types::{CategoricalTest, DriftConfig, DriftRecord, DriftSummary, TestKind};
use crate::dataset::{Column, ColumnType};
use crate::error::{Error, Result};

/// Column-by-column distribution comparator.
///
/// Numeric columns use the two-sample KS test on non-missing values;
/// categorical columns use a chi-square test on label frequencies. The
/// reference column's declared type decides which.
#[derive(Clone, Debug, Default)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    pub fn new(config: DriftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Compare one column of the reference dataset against the same column of
    /// the incoming dataset.
    pub fn compare_column(&self, reference: &Column, incoming: &Column) -> Result<DriftRecord> {
        let incoming = incoming.cast(reference.column_type());
        let record = match reference.column_type() {
            ColumnType::Numeric => self.continuous(reference, &incoming)?,
            ColumnType::Categorical => self.categorical(reference, &incoming)?,
        };
        debug!(
            column = %record.column,
            test = record.test.name(),
            statistic = ?record.statistic,
            p_value = ?record.p_value,
            drift = record.drift_detected,
            "column compared"
        );
        Ok(record)
    }

    /// KS test after dropping missing values from each side independently
    fn continuous(&self, reference: &Column, incoming: &Column) -> Result<DriftRecord> {
        let test = TestKind::KolmogorovSmirnov;
        let ref_values = reference.data().observed_numbers();
        let new_values = incoming.data().observed_numbers();
        if ref_values.is_empty() || new_values.is_empty() {
            return Ok(DriftRecord::insufficient(reference.name(), test));
        }

        let (statistic, p_value) = ks_two_sample(&ref_values, &new_values);
        self.finish(reference.name(), test, statistic, p_value)
    }

    fn categorical(&self, reference: &Column, incoming: &Column) -> Result<DriftRecord> {
        let ref_labels = reference.data().observed_labels();
        let new_labels = incoming.data().observed_labels();
        let ref_counts = value_counts(ref_labels.iter().map(String::as_str));
        let new_counts = value_counts(new_labels.iter().map(String::as_str));
        let (observed, expected) = align_counts(&ref_counts, &new_counts);

        match self.config.categorical_test {
            CategoricalTest::GoodnessOfFit => {
                let test = TestKind::ChiSquare;
                // The incoming side may be empty (epsilon path); the observed side may not
                if ref_labels.is_empty() {
                    return Ok(DriftRecord::insufficient(reference.name(), test));
                }
                let expected = rescale_expected(&observed, &expected, self.config.epsilon);
                let (statistic, p_value) = chi_square_goodness_of_fit(&observed, &expected);
                self.finish(reference.name(), test, statistic, p_value)
            }
            CategoricalTest::Contingency => {
                let test = TestKind::ChiSquareContingency;
                if ref_labels.is_empty() || new_labels.is_empty() {
                    return Ok(DriftRecord::insufficient(reference.name(), test));
                }
                let (statistic, p_value) = chi_square_contingency(&observed, &expected);
                self.finish(reference.name(), test, statistic, p_value)
            }
        }
    }

    fn finish(
        &self,
        column: &str,
        test: TestKind,
        statistic: f64,
        p_value: f64,
    ) -> Result<DriftRecord> {
        if !statistic.is_finite() || !p_value.is_finite() {
            return Err(Error::statistics(
                column,
                format!("{} produced statistic={statistic}, p_value={p_value}", test.name()),
            ));
        }
        Ok(DriftRecord {
            column: column.to_string(),
            test,
            statistic: Some(round4(statistic)),
            p_value: Some(round4(p_value)),
            drift_detected: p_value < self.config.significance,
        })
    }

    /// Get summary of drift results
    pub fn summary(records: &[DriftRecord]) -> DriftSummary {
        DriftSummary::from_records(records)
    }
}
