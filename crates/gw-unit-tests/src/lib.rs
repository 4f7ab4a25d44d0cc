//! Unit-test harness for the gravity-wave kernels
//!
//! Test cases are written once against [`UnitTest<D>`] and run on any
//! [`Device`](gw_device::Device): the harness names every view, policy and
//! execution-space type through the device bridge, works in packs of the
//! kernel module's width, and reaches kernel internals only through the
//! `UnitTestAccess` token it holds.
//!
//! # Layout
//!
//! - [`UnitTest`]: the shared environment (configuration, token, policies,
//!   seeded RNGs, pack-boundary level counts)
//! - [`Base`]: per-case fixture owning the module initialisation
//! - [`declare_test_cases!`]: the case registry; see [`cases`]
//! - [`reference`], [`compare`], [`data`]: scalar references, tolerance
//!   checks and profile generation
//!
//! ```
//! use gw_unit_tests::{MAX_PACK_SIZE, NUM_TEST_ITRS, Spack};
//!
//! assert_eq!(NUM_TEST_ITRS, MAX_PACK_SIZE / Spack::N);
//! ```

pub mod cases;
pub mod compare;
pub mod data;
pub mod env_guard;
mod error;
mod fixture;
pub mod reference;
mod registry;
pub mod report;
mod scope;

pub use cases::{
    DECLARED_CASES, TestGwHeatingDepth, TestGwProf, TestGwStormSpeed,
    TestGwdComputeStressProfiles, TestGwdComputeTendenciesFromStressDivergence, run_declared,
    run_declared_with,
};
pub use error::HarnessError;
pub use fixture::Base;
pub use registry::{CaseResult, PENDING_CASES, UnitTestCase, run_case, run_case_with};
pub use report::{CaseOutcome, RunReport};
pub use scope::{KernelEnv, MAX_PACK_SIZE, NUM_TEST_ITRS, Spack, UnitTest, num_test_itrs};

#[doc(hidden)]
pub use anyhow;
pub use gw_common;
pub use gw_device;
