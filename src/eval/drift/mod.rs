//! Drift Detection Module
//!
//! Compares a reference dataset with incoming data one column at a time:
//! - Kolmogorov-Smirnov test (continuous columns)
//! - Chi-square goodness of fit (categorical columns)
//! - Chi-square contingency test (categorical columns, opt-in)

mod detector;
mod statistical;
mod types;

#[cfg(test)]
mod tests;

// Re-export all public types
pub use detector::DriftDetector;
pub use types::{
    CategoricalTest, DriftConfig, DriftRecord, DriftStatus, DriftSummary, TestKind,
};

// Re-export statistical functions for testing/advanced use
pub use statistical::{
    align_counts, chi_square_contingency, chi_square_goodness_of_fit, chi_square_sf,
    ks_exact_p_value, ks_p_value, ks_statistic, ks_two_sample, rescale_expected, round4,
    value_counts, KS_EXACT_MAX_CELLS,
};
