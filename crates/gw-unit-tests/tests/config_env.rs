//! Fixture configuration from `GW_CONFIG` and the `GW_*` overrides.

use gw_device::HostSerial;
use gw_physics::live_inits;
use gw_unit_tests::Base;
use gw_unit_tests::env_guard::{EnvScope, GW_VARS};
use serial_test::serial;
use std::io::Write;

/// Every harness variable unset, then `overrides` applied.
fn vars<'a>(overrides: &[(&'a str, &'a str)]) -> Vec<(&'a str, Option<&'a str>)> {
    GW_VARS
        .iter()
        .map(|&var| (var, overrides.iter().find(|(k, _)| *k == var).map(|(_, v)| *v)))
        .collect()
}

#[test]
#[serial(gw_env, gw_init)]
fn overrides_reach_the_fixture() {
    temp_env::with_vars(vars(&[("GW_TEST_SEED", "42"), ("GW_TEST_COLUMNS", "2")]), || {
        let base = Base::<HostSerial>::new().unwrap();
        assert_eq!(base.config().seed, 42);
        assert_eq!(base.columns(), 2);
    });
    assert_eq!(live_inits(), 0);
}

#[test]
#[serial(gw_env, gw_init)]
fn config_file_then_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[testing]\nseed = 9\ncolumns = 5\n\n[physics]\npgwv = 2\ndc = 1.25\n"
    )
    .unwrap();
    let path = file.path().to_str().unwrap();

    temp_env::with_vars(vars(&[("GW_CONFIG", path)]), || {
        let base = Base::<HostSerial>::new().unwrap();
        assert_eq!(base.config().seed, 9);
        assert_eq!(base.columns(), 5);
        assert_eq!(base.common().num_waves(), 5);
    });
    temp_env::with_vars(vars(&[("GW_CONFIG", path), ("GW_TEST_COLUMNS", "1")]), || {
        let base = Base::<HostSerial>::new().unwrap();
        assert_eq!(base.columns(), 1);
        assert_eq!(base.config().seed, 9);
    });
}

#[test]
#[serial(gw_env, gw_init)]
fn invalid_values_fail_before_init() {
    for (var, value) in [
        ("GW_TEST_TOLERANCE", "-1"),
        ("GW_TEST_TOLERANCE", "tight"),
        ("GW_TEST_COLUMNS", "0"),
        ("GW_LOG_FORMAT", "xml"),
    ] {
        temp_env::with_vars(vars(&[(var, value)]), || {
            let err = Base::<HostSerial>::new().unwrap_err();
            assert!(format!("{err:#}").contains("configuration"), "{var}={value}: {err:#}");
            assert_eq!(live_inits(), 0);
        });
    }
}

#[test]
#[serial(gw_env, gw_init)]
fn missing_config_file_is_reported() {
    temp_env::with_vars(vars(&[("GW_CONFIG", "/nonexistent/gw.toml")]), || {
        let err = Base::<HostSerial>::new().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/gw.toml"));
    });
}

#[test]
#[serial(gw_env, gw_init)]
fn env_scope_restores_after_fixture() {
    let before = std::env::var("GW_TEST_SEED").ok();
    {
        let mut scope = EnvScope::clean();
        scope.set("GW_TEST_SEED", "77");
        let base = Base::<HostSerial>::new().unwrap();
        assert_eq!(base.config().seed, 77);
    }
    assert_eq!(std::env::var("GW_TEST_SEED").ok(), before);
    assert_eq!(live_inits(), 0);
}
