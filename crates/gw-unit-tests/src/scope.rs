//! The shared unit-test environment.

use gw_common::{Real, TestingConfig};
use gw_device::{
    DefaultDevice, Device, DeviceTypes, ExeSpace, MemberType, RangePolicy, TeamPolicy, Uview1d,
    Uview2d, Uview3d, View1d, View2d, View3d,
};
use gw_physics::testing::UnitTestAccess;
use gw_physics::{Functions, KernelTypes};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::marker::PhantomData;

/// The kernel module's small pack at the harness scalar type.
pub type Spack = gw_physics::Spack<Real>;

/// Widest pack the harness is written to cover.
pub const MAX_PACK_SIZE: usize = 16;

/// How many pack-width multiples fit in `max_pack_size`.
pub const fn num_test_itrs(max_pack_size: usize, pack_width: usize) -> usize {
    max_pack_size / pack_width
}

/// Iterations each case runs to sweep pack boundaries up to [`MAX_PACK_SIZE`].
pub const NUM_TEST_ITRS: usize = num_test_itrs(MAX_PACK_SIZE, Spack::N);

const _: () = assert!(NUM_TEST_ITRS >= 1, "pack width exceeds MAX_PACK_SIZE");

/// Kernel-module types as seen from a unit test.
pub trait KernelEnv {
    type Functions;
    type Scalar;
    type Spack;
    type Smask;
    type CrefTable;
}

/// Environment every test case runs against, bound to one device.
///
/// Carries the resolved testing configuration and the kernel module's
/// access token. The device's type family is available through
/// [`DeviceTypes`] and the kernel types through [`KernelEnv`].
pub struct UnitTest<D: Device = DefaultDevice> {
    config: TestingConfig,
    access: UnitTestAccess,
    _device: PhantomData<D>,
}

impl<D: Device> UnitTest<D> {
    pub const MAX_PACK_SIZE: usize = MAX_PACK_SIZE;
    pub const NUM_TEST_ITRS: usize = NUM_TEST_ITRS;

    pub fn new(config: TestingConfig) -> Self {
        Self { config, access: UnitTestAccess::grant(), _device: PhantomData }
    }

    pub fn config(&self) -> &TestingConfig {
        &self.config
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    pub fn columns(&self) -> usize {
        self.config.columns
    }

    pub fn access(&self) -> &UnitTestAccess {
        &self.access
    }

    /// One team per column, sized for `nlev` levels.
    pub fn team_policy(&self, ncol: usize, nlev: usize) -> TeamPolicy<D> {
        TeamPolicy::for_work(ncol, nlev)
    }

    pub fn range_policy(&self, n: usize) -> RangePolicy<D> {
        RangePolicy::new(0, n)
    }

    /// Generator seeded from the configured seed and `case`, so each case
    /// sees the same draws regardless of which other cases ran.
    pub fn rng(&self, case: &str) -> StdRng {
        StdRng::seed_from_u64(self.config.seed ^ fnv1a(case))
    }

    /// Level counts around every pack boundary up to `MAX_PACK_SIZE`.
    pub fn pack_boundary_lengths() -> Vec<usize> {
        let mut lengths: Vec<usize> = (1..=NUM_TEST_ITRS)
            .flat_map(|i| {
                let edge = i * Spack::N;
                [edge - 1, edge, edge + 1]
            })
            .filter(|&n| n > 0)
            .collect();
        lengths.sort_unstable();
        lengths.dedup();
        lengths
    }

    /// Identity of the compiled scope, for comparing test binaries.
    pub fn fingerprint() -> String {
        format!(
            "device={} real={} pack={} max_pack={} itrs={}",
            D::NAME,
            std::any::type_name::<Real>(),
            Spack::N,
            MAX_PACK_SIZE,
            NUM_TEST_ITRS
        )
    }
}

impl<D: Device> fmt::Debug for UnitTest<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitTest").field("device", &D::NAME).field("config", &self.config).finish()
    }
}

impl<D: Device> DeviceTypes for UnitTest<D> {
    type Device = D;
    type ExeSpace = ExeSpace<D>;
    type MemberType = MemberType<D>;
    type TeamPolicy = TeamPolicy<D>;
    type RangePolicy = RangePolicy<D>;
    type View1d<S> = View1d<S, D>;
    type View2d<S> = View2d<S, D>;
    type View3d<S> = View3d<S, D>;
    type Uview1d<'a, S: 'a> = Uview1d<'a, S, D>;
    type Uview2d<'a, S: 'a> = Uview2d<'a, S, D>;
    type Uview3d<'a, S: 'a> = Uview3d<'a, S, D>;
}

impl<D: Device> KernelEnv for UnitTest<D> {
    type Functions = Functions<Real, D>;
    type Scalar = <Functions<Real, D> as KernelTypes>::Scalar;
    type Spack = <Functions<Real, D> as KernelTypes>::Spack;
    type Smask = <Functions<Real, D> as KernelTypes>::Smask;
    type CrefTable = <Functions<Real, D> as KernelTypes>::CrefTable;
}

fn fnv1a(s: &str) -> u64 {
    s.bytes().fold(0xcbf2_9ce4_8422_2325, |h, b| (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_device::HostSerial;
    use rand::Rng;

    #[test]
    fn iteration_count_is_floor_division() {
        assert_eq!(num_test_itrs(16, 4), 4);
        assert_eq!(num_test_itrs(16, 16), 1);
        assert_eq!(num_test_itrs(16, 5), 3);
        assert_eq!(num_test_itrs(16, 1), 16);
        assert_eq!(NUM_TEST_ITRS, MAX_PACK_SIZE / gw_common::SMALL_PACK_SIZE);
    }

    #[test]
    fn boundary_lengths_straddle_each_pack_edge() {
        let lengths = UnitTest::<HostSerial>::pack_boundary_lengths();
        let n = Spack::N;
        assert!(lengths.windows(2).all(|w| w[0] < w[1]));
        assert!(lengths.contains(&(n + 1)));
        assert!(lengths.contains(&(NUM_TEST_ITRS * n)));
        assert!(lengths.iter().all(|&len| len > 0));
    }

    #[test]
    fn case_rngs_are_independent_and_reproducible() {
        let env = UnitTest::<HostSerial>::new(TestingConfig::default());
        let a: u64 = env.rng("gw_prof").random();
        let b: u64 = env.rng("gw_prof").random();
        let c: u64 = env.rng("gw_storm_speed").random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
