//! Property-based tests for configuration validation

use proptest::prelude::*;

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;

fn arb_valid_config() -> impl Strategy<Value = PipelineConfig> {
    (
        1e-6f64..0.999,                   // significance
        1e-12f64..1.0,                    // epsilon
        1usize..50,                       // min_drifted_columns
        proptest::option::of(0u32..=15),  // float_decimals
        "[a-z_]{1,24}",                   // table
    )
        .prop_map(|(significance, epsilon, threshold, decimals, table)| {
            let mut config = PipelineConfig::default();
            config.drift.significance = significance;
            config.drift.epsilon = epsilon;
            config.alert.min_drifted_columns = threshold;
            config.dedup.float_decimals = decimals;
            config.storage.table = table;
            config
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_significance_at_or_above_one_fails(config in arb_valid_config(), s in 1.0f64..100.0) {
        let mut config = config;
        config.drift.significance = s;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidSignificance(_))
        ));
    }

    #[test]
    fn prop_negative_epsilon_fails(config in arb_valid_config(), e in -1.0f64..=0.0) {
        let mut config = config;
        config.drift.epsilon = e;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn prop_yaml_roundtrip_preserves_config(config in arb_valid_config()) {
        let yaml = config.to_yaml().unwrap();
        let parsed = PipelineConfig::from_yaml_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
