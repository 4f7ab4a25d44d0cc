//! Property tests for configuration validation and TOML loading

use gw_common::{GwConfig, LogFormat};
use proptest::prelude::*;

fn log_format() -> impl Strategy<Value = LogFormat> {
    prop_oneof![Just(LogFormat::Compact), Just(LogFormat::Pretty), Just(LogFormat::Json)]
}

proptest! {
    #[test]
    fn builder_accepts_exactly_the_valid_ranges(
        tolerance in -1.0f64..1.0,
        columns in 0usize..8,
        dc in -5.0f64..5.0,
        effgw in -1.0f64..2.0,
    ) {
        let built = GwConfig::builder()
            .tolerance(tolerance)
            .columns(columns)
            .dc(dc)
            .effgw(effgw)
            .build();
        let valid = tolerance > 0.0 && columns > 0 && dc > 0.0 && effgw >= 0.0;
        prop_assert_eq!(built.is_ok(), valid);
    }

    #[test]
    fn valid_configs_survive_toml(
        seed in 0u64..i64::MAX as u64,
        tolerance in 1.0e-15f64..1.0e-1,
        columns in 1usize..64,
        pgwv in 0usize..40,
        dc in 0.1f64..10.0,
        format in log_format(),
    ) {
        let config = GwConfig::builder()
            .seed(seed)
            .tolerance(tolerance)
            .columns(columns)
            .pgwv(pgwv)
            .dc(dc)
            .log_format(format)
            .build()
            .unwrap();
        let text = toml::to_string(&config).unwrap();
        let back: GwConfig = toml::from_str(&text).unwrap();
        prop_assert_eq!(back, config);
    }

    #[test]
    fn log_format_parses_its_display(format in log_format()) {
        prop_assert_eq!(format.to_string().to_uppercase().parse::<LogFormat>(), Ok(format));
    }
}
