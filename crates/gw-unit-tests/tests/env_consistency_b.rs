//! Scope constants as seen from a second test binary.

mod common;

use common::{MAX_PACK_SIZE, expected_fingerprint};
use gw_common::GwConfig;
use gw_device::{Accelerator, DefaultDevice, Device};
use gw_unit_tests::{Base, NUM_TEST_ITRS, RunReport, Spack, UnitTest};
use serial_test::serial;

#[test]
fn fingerprint_matches_build() {
    assert_eq!(UnitTest::<Accelerator>::fingerprint(), expected_fingerprint(Accelerator::NAME));
}

#[test]
fn report_header_matches_scope() {
    let report = RunReport::new(DefaultDevice::NAME);
    assert_eq!(report.pack_size, Spack::N);
    assert_eq!(report.max_pack_size, MAX_PACK_SIZE);
    assert_eq!(report.num_test_itrs, NUM_TEST_ITRS);
}

#[test]
#[serial(gw_init)]
fn fixture_exposes_the_same_scope() {
    let base = Base::<Accelerator>::with_config(&GwConfig::default()).unwrap();
    let lengths = UnitTest::<Accelerator>::pack_boundary_lengths();
    assert_eq!(lengths.first().copied(), Some(Spack::N.saturating_sub(1).max(1)));
    assert_eq!(lengths.last().copied(), Some(NUM_TEST_ITRS * Spack::N + 1));
    assert!(lengths.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(base.columns(), GwConfig::default().testing.columns);
}
