//! Tests for drift detection module.

use approx::assert_relative_eq;

use super::*;
use crate::dataset::Column;
use crate::error::Error;

fn numeric(name: &str, range: std::ops::Range<i32>) -> Column {
    Column::from_f64(name, range.map(f64::from))
}

fn labels(name: &str, values: impl IntoIterator<Item = usize>) -> Column {
    Column::from_labels(name, values.into_iter().map(|v| v.to_string()))
}

#[test]
fn test_test_kind_names_roundtrip() {
    for kind in [TestKind::KolmogorovSmirnov, TestKind::ChiSquare, TestKind::ChiSquareContingency] {
        assert_eq!(TestKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(TestKind::KolmogorovSmirnov.name(), "KS-test");
    assert_eq!(TestKind::ChiSquare.name(), "Chi-square");
    assert_eq!(TestKind::from_name("PSI"), None);
}

#[test]
fn test_default_config() {
    let config = DriftConfig::default();
    assert_relative_eq!(config.significance, 0.05);
    assert_eq!(config.categorical_test, CategoricalTest::GoodnessOfFit);
    assert_relative_eq!(config.epsilon, 1e-8);
}

// =============================================================================
// Statistical kernels
// =============================================================================

#[test]
fn test_ks_statistic_handles_ties() {
    let d = ks_statistic(&[1.0, 1.0, 2.0], &[1.0, 2.0, 2.0]);
    assert_relative_eq!(d, 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_ks_statistic_disjoint_samples() {
    let d = ks_statistic(&[1.0, 2.0, 3.0], &[10.0, 11.0]);
    assert_relative_eq!(d, 1.0);
}

#[test]
fn test_ks_p_value_bounds() {
    assert_relative_eq!(ks_p_value(0.0), 1.0);
    assert_relative_eq!(ks_p_value(0.01), 1.0);
    // Critical value of the Kolmogorov distribution at alpha = 0.05
    assert_relative_eq!(ks_p_value(1.358), 0.05, epsilon = 1e-3);
    assert!(ks_p_value(3.0) < 1e-6);
    assert!(ks_p_value(0.8) > ks_p_value(1.2));
}

#[test]
fn test_ks_exact_p_value_small_samples() {
    // Only 2 of the C(6, 3) = 20 orderings separate the samples completely
    assert_relative_eq!(ks_exact_p_value(3, 3, 1.0), 0.1, epsilon = 1e-12);
    assert_relative_eq!(ks_exact_p_value(5, 5, 0.6), 5.0 / 14.0, epsilon = 1e-12);
    assert_relative_eq!(ks_exact_p_value(4, 4, 0.0), 1.0);
}

#[test]
fn test_ks_two_sample_switches_to_asymptotic() {
    let small: Vec<f64> = (0..50).map(f64::from).collect();
    let shifted: Vec<f64> = (10..60).map(f64::from).collect();
    let (d, p) = ks_two_sample(&small, &shifted);
    assert_relative_eq!(d, 0.2);
    assert_relative_eq!(p, ks_exact_p_value(50, 50, 0.2), epsilon = 1e-12);

    let large: Vec<f64> = (0..200).map(f64::from).collect();
    let large_shifted: Vec<f64> = (40..240).map(f64::from).collect();
    assert!(large.len() * large_shifted.len() > KS_EXACT_MAX_CELLS);
    let (d, p) = ks_two_sample(&large, &large_shifted);
    let sqrt_ne = (200.0f64 * 200.0 / 400.0).sqrt();
    assert_relative_eq!(p, ks_p_value((sqrt_ne + 0.12 + 0.11 / sqrt_ne) * d), epsilon = 1e-12);
}

#[test]
fn test_chi_square_sf_matches_tables() {
    assert_relative_eq!(chi_square_sf(3.841_458_8, 1), 0.05, epsilon = 1e-6);
    assert_relative_eq!(chi_square_sf(9.487_729, 4), 0.05, epsilon = 1e-6);
    assert_relative_eq!(chi_square_sf(0.0, 3), 1.0);
    assert_relative_eq!(chi_square_sf(5.0, 0), 1.0);
}

#[test]
fn test_align_counts_union_of_labels() {
    let left = value_counts(["North", "North", "East"]);
    let right = value_counts(["West", "North"]);
    let (l, r) = align_counts(&left, &right);
    // Labels sorted: East, North, West
    assert_eq!(l, vec![1.0, 2.0, 0.0]);
    assert_eq!(r, vec![0.0, 1.0, 1.0]);
}

#[test]
fn test_rescale_expected_matches_observed_total() {
    let expected = rescale_expected(&[10.0, 30.0], &[1.0, 1.0], 1e-8);
    assert_eq!(expected, vec![20.0, 20.0]);
}

#[test]
fn test_rescale_expected_replaces_zero_cells() {
    let expected = rescale_expected(&[10.0, 30.0], &[4.0, 0.0], 1e-8);
    assert_relative_eq!(expected[0], 40.0);
    assert_relative_eq!(expected[1], 1e-8);
}

#[test]
fn test_zero_sum_incoming_is_epsilon_adjusted() {
    // North: 10 vs 0, South: 0 vs 0
    let observed = [10.0, 0.0];
    let expected = rescale_expected(&observed, &[0.0, 0.0], 1e-8);
    assert_relative_eq!(expected[0], 5.0, epsilon = 1e-9);
    assert_relative_eq!(expected[1], 5.0, epsilon = 1e-9);

    let (stat, p) = chi_square_goodness_of_fit(&observed, &expected);
    assert!(stat.is_finite());
    assert!(p.is_finite());
    assert_relative_eq!(stat, 10.0, epsilon = 1e-6);
    assert!((0.0..=1.0).contains(&p));
}

#[test]
fn test_contingency_is_symmetric() {
    let a = [30.0, 10.0, 5.0];
    let b = [10.0, 30.0, 5.0];
    let (s1, p1) = chi_square_contingency(&a, &b);
    let (s2, p2) = chi_square_contingency(&b, &a);
    assert_relative_eq!(s1, s2, epsilon = 1e-12);
    assert_relative_eq!(p1, p2, epsilon = 1e-12);
    assert!(p1 < 0.05);
}

#[test]
fn test_round4() {
    assert_relative_eq!(round4(0.123_456), 0.1235);
    assert_relative_eq!(round4(1.0), 1.0);
    assert_relative_eq!(round4(0.000_04), 0.0);
}

// =============================================================================
// Detector: continuous path
// =============================================================================

#[test]
fn test_ks_same_distribution() {
    let detector = DriftDetector::default();
    let record = detector.compare_column(&numeric("size_sqft", 0..100), &numeric("size_sqft", 0..100)).unwrap();

    assert_eq!(record.test, TestKind::KolmogorovSmirnov);
    assert_eq!(record.statistic, Some(0.0));
    assert_eq!(record.p_value, Some(1.0));
    assert!(!record.drift_detected);
    assert_eq!(record.status(), DriftStatus::Evaluated);
}

#[test]
fn test_ks_shifted_distribution_drifts() {
    let detector = DriftDetector::default();
    let record = detector.compare_column(&numeric("price", 0..100), &numeric("price", 50..150)).unwrap();

    assert_eq!(record.statistic, Some(0.5));
    assert!(record.p_value.unwrap() < 0.05);
    assert!(record.drift_detected);
}

#[test]
fn test_ks_few_incoming_rows_use_exact_p_value() {
    let detector = DriftDetector::default();
    let record = detector
        .compare_column(&Column::from_f64("price", [1.0, 2.0, 3.0]), &Column::from_f64("price", [4.0, 5.0, 6.0]))
        .unwrap();

    assert_eq!(record.statistic, Some(1.0));
    assert_eq!(record.p_value, Some(0.1));
    assert!(!record.drift_detected);
}

#[test]
fn test_ks_constant_columns_are_evaluated() {
    let detector = DriftDetector::default();
    let same = detector
        .compare_column(&Column::from_f64("n_rooms", [4.0; 30]), &Column::from_f64("n_rooms", [4.0; 30]))
        .unwrap();
    assert_eq!(same.status(), DriftStatus::Evaluated);
    assert_eq!(same.statistic, Some(0.0));
    assert_eq!(same.p_value, Some(1.0));

    let moved = detector
        .compare_column(&Column::from_f64("n_rooms", [4.0; 30]), &Column::from_f64("n_rooms", [5.0; 30]))
        .unwrap();
    assert_eq!(moved.statistic, Some(1.0));
    assert!(moved.drift_detected);
}

#[test]
fn test_ks_drops_missing_values_independently() {
    let detector = DriftDetector::default();
    let reference = Column::numeric("flat_age", vec![Some(1.0), None, Some(2.0), Some(3.0)]);
    let incoming = Column::numeric("flat_age", vec![None, Some(1.0), Some(2.0), Some(f64::NAN), Some(3.0)]);

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert_eq!(record.statistic, Some(0.0));
    assert!(!record.drift_detected);
}

#[test]
fn test_ks_empty_side_is_insufficient_data() {
    let detector = DriftDetector::default();
    let reference = numeric("build_year", 1980..2000);
    let incoming = Column::numeric("build_year", vec![None, None]);

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert_eq!(record.status(), DriftStatus::InsufficientData);
    assert_eq!(record.statistic, None);
    assert_eq!(record.p_value, None);
    assert!(!record.drift_detected);
}

#[test]
fn test_significance_is_configurable() {
    // D = 0.2 over 50 samples per side gives p around 0.24
    let reference = numeric("size_per_room", 0..50);
    let incoming = numeric("size_per_room", 10..60);

    let strict = DriftDetector::default().compare_column(&reference, &incoming).unwrap();
    assert!(!strict.drift_detected);

    let loose = DriftDetector::new(DriftConfig { significance: 0.5, ..Default::default() })
        .compare_column(&reference, &incoming)
        .unwrap();
    assert!(loose.drift_detected);
    assert_eq!(strict.p_value, loose.p_value);
}

#[test]
fn test_incoming_labels_cast_to_reference_numeric() {
    let detector = DriftDetector::default();
    let reference = Column::from_f64("n_bedrooms", [2.0, 3.0, 4.0]);
    let incoming = Column::from_labels("n_bedrooms", ["2", "3", "4"]);

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert_eq!(record.test, TestKind::KolmogorovSmirnov);
    assert_eq!(record.statistic, Some(0.0));
}

// =============================================================================
// Detector: categorical path
// =============================================================================

#[test]
fn test_chi_square_same() {
    let detector = DriftDetector::default();
    let data = labels("region", (0..100).map(|i| i % 5));
    let record = detector.compare_column(&data, &data).unwrap();

    assert_eq!(record.test, TestKind::ChiSquare);
    assert_eq!(record.statistic, Some(0.0));
    assert_eq!(record.p_value, Some(1.0));
    assert!(!record.drift_detected);
}

#[test]
fn test_chi_square_different() {
    let detector = DriftDetector::default();
    let reference = labels("region", (0..100).map(|i| i % 5));
    let incoming = labels("region", (0..100).map(|_| 0));

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert!(record.statistic.unwrap() > 1e6);
    assert_eq!(record.p_value, Some(0.0));
    assert!(record.drift_detected);
}

#[test]
fn test_chi_square_is_not_symmetric() {
    let detector = DriftDetector::default();
    let uniform = labels("area", (0..100).map(|i| i % 5));
    let skewed = labels("area", (0..100).map(|_| 0));

    let forward = detector.compare_column(&uniform, &skewed).unwrap();
    let backward = detector.compare_column(&skewed, &uniform).unwrap();
    assert_ne!(forward.statistic, backward.statistic);
    assert_eq!(backward.statistic, Some(400.0));
}

#[test]
fn test_chi_square_all_missing_incoming_is_finite() {
    let detector = DriftDetector::default();
    let reference = Column::from_labels("region", vec!["North"; 10]);
    let incoming = Column::categorical("region", vec![None; 6]);

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert_eq!(record.status(), DriftStatus::Evaluated);
    let p = record.p_value.unwrap();
    assert!(p.is_finite());
    assert!((0.0..=1.0).contains(&p));
}

#[test]
fn test_chi_square_empty_reference_is_insufficient_data() {
    let detector = DriftDetector::default();
    let reference = Column::categorical("district", vec![None; 3]);
    let incoming = Column::from_labels("district", ["D19", "D20"]);

    let record = detector.compare_column(&reference, &incoming).unwrap();
    assert_eq!(record.status(), DriftStatus::InsufficientData);
    assert!(!record.drift_detected);
}

#[test]
fn test_contingency_mode() {
    let detector = DriftDetector::new(DriftConfig {
        categorical_test: CategoricalTest::Contingency,
        ..Default::default()
    });
    let uniform = labels("room_type", (0..100).map(|i| i % 4));
    let skewed = labels("room_type", (0..100).map(|i| if i < 70 { 0 } else { i % 4 }));

    let forward = detector.compare_column(&uniform, &skewed).unwrap();
    let backward = detector.compare_column(&skewed, &uniform).unwrap();
    assert_eq!(forward.test, TestKind::ChiSquareContingency);
    assert_eq!(forward.statistic, backward.statistic);
    assert!(forward.drift_detected);

    let same = detector.compare_column(&uniform, &uniform).unwrap();
    assert_eq!(same.p_value, Some(1.0));

    let empty = Column::categorical("room_type", vec![None; 2]);
    let record = detector.compare_column(&uniform, &empty).unwrap();
    assert_eq!(record.status(), DriftStatus::InsufficientData);
}

#[test]
fn test_results_are_rounded_to_four_decimals() {
    let detector = DriftDetector::default();
    let records = [
        detector.compare_column(&numeric("a", 0..37), &numeric("a", 5..61)).unwrap(),
        detector
            .compare_column(&labels("b", (0..91).map(|i| i % 3)), &labels("b", (0..57).map(|i| i % 4)))
            .unwrap(),
    ];
    for record in &records {
        for value in [record.statistic.unwrap(), record.p_value.unwrap()] {
            let scaled = value * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{value} has more than 4 decimals");
        }
    }
}

#[test]
fn test_non_finite_statistic_is_an_error() {
    let detector = DriftDetector::default();
    let reference = Column::from_f64("price", [1.0, f64::INFINITY]);
    let incoming = Column::from_f64("price", [f64::NEG_INFINITY, 2.0]);
    // Infinite values sort fine, so KS stays finite
    assert!(detector.compare_column(&reference, &incoming).is_ok());

    let err = Error::statistics("price", "nan");
    assert_eq!(err.code(), "E020");
}

#[test]
fn test_drift_summary() {
    let records = vec![
        DriftRecord {
            column: "price".into(),
            test: TestKind::KolmogorovSmirnov,
            statistic: Some(0.5),
            p_value: Some(0.01),
            drift_detected: true,
        },
        DriftRecord {
            column: "region".into(),
            test: TestKind::ChiSquare,
            statistic: Some(0.1),
            p_value: Some(0.3),
            drift_detected: false,
        },
        DriftRecord::insufficient("build_year", TestKind::KolmogorovSmirnov),
    ];

    let summary = DriftDetector::summary(&records);
    assert_eq!(summary.total_columns, 3);
    assert_eq!(summary.drifted_columns, 1);
    assert_eq!(summary.insufficient_columns, 1);
    assert!(summary.has_drift());
    assert!((summary.drift_percentage() - 33.33).abs() < 0.01);
}

#[test]
fn test_drift_summary_empty() {
    let summary = DriftSummary::from_records(&[]);
    assert!(!summary.has_drift());
    assert_relative_eq!(summary.drift_percentage(), 0.0);
}
