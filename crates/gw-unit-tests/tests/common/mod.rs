//! Expectations shared by the env-consistency test binaries.

use gw_common::{Real, SMALL_PACK_SIZE};

pub const MAX_PACK_SIZE: usize = 16;

/// The fingerprint every test binary of this build must report for `device`.
pub fn expected_fingerprint(device: &str) -> String {
    format!(
        "device={device} real={} pack={SMALL_PACK_SIZE} max_pack={MAX_PACK_SIZE} itrs={}",
        std::any::type_name::<Real>(),
        MAX_PACK_SIZE / SMALL_PACK_SIZE
    )
}
