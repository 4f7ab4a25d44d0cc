//! Test-case declaration and dispatch.
//!
//! Every case is declared once with [`declare_test_cases!`](crate::declare_test_cases)
//! and defined by implementing [`UnitTestCase`] for the generated type. A
//! declared name without a definition does not compile:
//!
//! ```compile_fail
//! use gw_unit_tests::declare_test_cases;
//!
//! declare_test_cases! { TestNeverDefined }
//!
//! fn main() {}
//! ```
//!
//! ```
//! use gw_unit_tests::gw_device::Device;
//! use gw_unit_tests::{Base, CaseResult, UnitTestCase, declare_test_cases};
//!
//! declare_test_cases! { TestTrivial }
//!
//! impl<D: Device> UnitTestCase<D> for TestTrivial<D> {
//!     const NAME: &'static str = "trivial";
//!
//!     fn run(base: &Base<D>) -> CaseResult {
//!         assert!(base.tolerance() > 0.0);
//!         Ok(())
//!     }
//! }
//!
//! fn main() {
//!     assert_eq!(DECLARED_CASES, &["TestTrivial"]);
//! }
//! ```

use crate::Base;
use anyhow::Context;
use gw_common::{GwConfig, init_logging};
use gw_device::Device;

pub type CaseResult = anyhow::Result<()>;

/// A unit test runnable on device `D`.
pub trait UnitTestCase<D: Device> {
    const NAME: &'static str;

    fn run(base: &Base<D>) -> CaseResult;
}

/// Cases from the full kernel suite that have not been ported yet.
pub const PENDING_CASES: &[&str] = &[
    "TestMomentumEnergyConservation",
    // Diffusivity half of the stress-profile test; see TestGwdComputeStressProfiles.
    "TestGwdComputeDiffusivities",
    "TestGwdProjectTau",
    "TestGwdPrecalcRhoi",
    "TestGwDragProf",
    "TestGwFrontProjectWinds",
    "TestGwFrontGwSources",
    "TestGwCmSrc",
    "TestGwConvectProjectWinds",
    "TestGwConvectGwSources",
    "TestGwBeresSrc",
    "TestGwEdiff",
    "TestGwDiffTend",
    "TestGwOroSrc",
];

/// Run `C` on `D` with configuration from the environment.
pub fn run_case<D: Device, C: UnitTestCase<D>>() -> CaseResult {
    let config = GwConfig::from_env().context("resolving unit-test configuration")?;
    run_case_with::<D, C>(&config)
}

/// Run `C` on `D` inside a fresh fixture.
pub fn run_case_with<D: Device, C: UnitTestCase<D>>(config: &GwConfig) -> CaseResult {
    init_logging(&config.logging);
    let span = tracing::info_span!("unit_test", case = C::NAME, device = D::NAME);
    let _entered = span.enter();

    let base = Base::<D>::with_config(config)?;
    let result = C::run(&base).with_context(|| format!("{} on {}", C::NAME, D::NAME));
    drop(base);
    match &result {
        Ok(()) => tracing::debug!("passed"),
        Err(e) => tracing::debug!(error = %e, "failed"),
    }
    result
}

/// Declare the unit-test cases.
///
/// Generates, for each name, a zero-sized `Name<D = DefaultDevice>` type,
/// plus `DECLARED_CASES`, `run_declared` and `run_declared_with`. Every
/// declared type must implement [`UnitTestCase`] for each device.
#[macro_export]
macro_rules! declare_test_cases {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub struct $name<D: $crate::gw_device::Device = $crate::gw_device::DefaultDevice>(
                ::std::marker::PhantomData<D>,
            );
        )+

        /// Declared case names, in declaration order.
        pub const DECLARED_CASES: &[&str] = &[$(stringify!($name)),+];

        #[allow(dead_code)]
        fn __assert_cases_defined() {
            fn defined<D: $crate::gw_device::Device, C: $crate::UnitTestCase<D>>() {}
            $(
                defined::<$crate::gw_device::HostSerial, $name<$crate::gw_device::HostSerial>>();
                defined::<$crate::gw_device::HostThreads, $name<$crate::gw_device::HostThreads>>();
                defined::<$crate::gw_device::Accelerator, $name<$crate::gw_device::Accelerator>>();
            )+
        }

        /// Run every declared case on `D` with configuration from the
        /// environment.
        #[allow(dead_code)]
        pub fn run_declared<D: $crate::gw_device::Device>() -> $crate::anyhow::Result<$crate::RunReport>
        where
            $($name<D>: $crate::UnitTestCase<D>,)+
        {
            let config = $crate::gw_common::GwConfig::from_env()?;
            run_declared_with::<D>(&config)
        }

        /// Run every declared case on `D`, in declaration order.
        #[allow(dead_code)]
        pub fn run_declared_with<D: $crate::gw_device::Device>(
            config: &$crate::gw_common::GwConfig,
        ) -> $crate::anyhow::Result<$crate::RunReport>
        where
            $($name<D>: $crate::UnitTestCase<D>,)+
        {
            let mut report = $crate::RunReport::new(<D as $crate::gw_device::Device>::NAME);
            $(report.run::<D, $name<D>>(config);)+
            if let Some(path) = &config.testing.report_path {
                report.write_json(path)?;
            }
            Ok(report)
        }
    };
}
