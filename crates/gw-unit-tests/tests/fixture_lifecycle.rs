//! The fixture finalises the kernel module on every exit path.

use gw_common::warn_once::has_warned;
use gw_common::{GwConfig, Real, SMALL_PACK_SIZE};
use gw_device::{Device, HostSerial, HostThreads, View2d, View3d};
use gw_pack::npack;
use gw_physics::{Functions, WARNING_KEYS, live_inits};
use gw_unit_tests::data::to_view1d;
use gw_unit_tests::{
    Base, CaseResult, RunReport, Spack, TestGwdComputeStressProfiles, UnitTestCase,
    declare_test_cases, run_case_with,
};
use serial_test::serial;
use std::panic::{AssertUnwindSafe, catch_unwind};

declare_test_cases! {
    TestPanics,
    TestFails,
    TestSeesInit,
}

impl<D: Device> UnitTestCase<D> for TestPanics<D> {
    const NAME: &'static str = "panics";

    fn run(_base: &Base<D>) -> CaseResult {
        panic!("case panicked mid-run");
    }
}

impl<D: Device> UnitTestCase<D> for TestFails<D> {
    const NAME: &'static str = "fails";

    fn run(_base: &Base<D>) -> CaseResult {
        anyhow::bail!("nm[3] out of tolerance")
    }
}

impl<D: Device> UnitTestCase<D> for TestSeesInit<D> {
    const NAME: &'static str = "sees_init";

    fn run(base: &Base<D>) -> CaseResult {
        anyhow::ensure!(live_inits() == 1, "expected one live init, found {}", live_inits());
        anyhow::ensure!(base.common().num_waves() == 2 * base.common().pgwv() + 1);
        Ok(())
    }
}

#[test]
#[serial(gw_init)]
fn init_lives_exactly_as_long_as_the_fixture() {
    let config = GwConfig::default();
    for _ in 0..5 {
        let base = Base::<HostSerial>::with_config(&config).unwrap();
        assert_eq!(live_inits(), 1);
        drop(base);
        assert_eq!(live_inits(), 0);
    }
}

#[test]
#[serial(gw_init)]
fn passing_case_sees_one_init() {
    run_case_with::<HostThreads, TestSeesInit<HostThreads>>(&GwConfig::default()).unwrap();
    assert_eq!(live_inits(), 0);
}

#[test]
#[serial(gw_init)]
fn failing_case_finalises() {
    let err = run_case_with::<HostSerial, TestFails<HostSerial>>(&GwConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("nm[3] out of tolerance"));
    assert!(err.to_string().contains("fails on HostSerial"));
    assert_eq!(live_inits(), 0);
}

#[test]
#[serial(gw_init)]
fn panicking_case_finalises() {
    let config = GwConfig::default();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        run_case_with::<HostSerial, TestPanics<HostSerial>>(&config)
    }));
    assert!(outcome.is_err());
    assert_eq!(live_inits(), 0);
}

#[test]
#[serial(gw_init)]
fn report_keeps_going_after_a_failure() {
    let config = GwConfig::default();
    let mut report = RunReport::new(HostSerial::NAME);
    report.run::<HostSerial, TestFails<HostSerial>>(&config);
    report.run::<HostSerial, TestSeesInit<HostSerial>>(&config);

    assert!(!report.passed());
    let failed: Vec<_> = report.failures().map(|c| c.name.as_str()).collect();
    assert_eq!(failed, ["fails"]);
    assert!(report.cases[1].passed);
    assert_eq!(live_inits(), 0);
}

#[test]
fn declared_names_follow_declaration_order() {
    assert_eq!(DECLARED_CASES, ["TestPanics", "TestFails", "TestSeesInit"]);
}

#[test]
#[serial(gw_init)]
fn invalid_physics_config_leaves_nothing_initialised() {
    let mut config = GwConfig::default();
    config.physics.dc = 0.0;
    assert!(Base::<HostSerial>::with_config(&config).is_err());
    assert_eq!(live_inits(), 0);
}

const SRC_LEVEL_WARNING: &str = "gwd_compute_stress_profiles.src_level";

#[test]
#[serial(gw_init)]
fn kernel_warnings_do_not_outlive_the_fixture() {
    assert!(WARNING_KEYS.contains(&SRC_LEVEL_WARNING));
    let config = GwConfig::default();
    let base = Base::<HostSerial>::with_config(&config).unwrap();

    let pver = 3;
    let nint = npack::<SMALL_PACK_SIZE>(pver + 1);
    let src_level = to_view1d::<usize, HostSerial>("src_level", vec![pver + 2]).unwrap();
    let ubi = View2d::<Spack, HostSerial>::new("ubi", [1, nint]);
    let mut tau = View3d::<Spack, HostSerial>::new("tau", [1, base.common().num_waves(), nint]);
    Functions::<Real, HostSerial>::gwd_compute_stress_profiles(
        &base.team_policy(1, pver + 1),
        base.common(),
        pver,
        &src_level,
        &ubi,
        &mut tau,
    )
    .unwrap();
    assert!(has_warned(SRC_LEVEL_WARNING));

    drop(base);
    assert!(!has_warned(SRC_LEVEL_WARNING));

    let next = Base::<HostSerial>::with_config(&config).unwrap();
    assert!(WARNING_KEYS.iter().all(|key| !has_warned(key)));
    drop(next);
}

#[test]
#[serial(gw_init)]
fn clamping_case_leaves_no_warning_behind() {
    run_case_with::<HostSerial, TestGwdComputeStressProfiles<HostSerial>>(&GwConfig::default())
        .unwrap();
    assert_eq!(live_inits(), 0);
    assert!(WARNING_KEYS.iter().all(|key| !has_warned(key)));
}
