mod gw_prof;
mod heating_depth;
mod storm_speed;
mod stress_divergence;
mod stress_profiles;

#[cfg_attr(not(any(test, feature = "unit-test-access")), allow(unused_imports))]
pub(crate) use gw_prof::interface_temperature;
#[cfg_attr(not(any(test, feature = "unit-test-access")), allow(unused_imports))]
pub(crate) use stress_profiles::critical_level;

/// `warn_once!` keys the kernels report under. They belong to the module's
/// initialisation and are forgotten when the last [`GwInit`](crate::GwInit)
/// is finalised.
pub const WARNING_KEYS: &[&str] =
    &[storm_speed::HEATING_RANGE_WARNING, stress_profiles::SRC_LEVEL_WARNING];

use gw_common::{GwError, Result, SMALL_PACK_SIZE};
use gw_device::ViewStorage;

const W: usize = SMALL_PACK_SIZE;

pub(crate) fn require_levels(pver: usize) -> Result<()> {
    if pver == 0 {
        return Err(GwError::InvalidArgument("pver must be at least 1".into()));
    }
    Ok(())
}

fn check_extents<S, const R: usize>(
    what: &str,
    view: &impl ViewStorage<S, R>,
    expected: [usize; R],
) -> Result<()> {
    let actual = view.extents();
    if actual != expected {
        return Err(GwError::shape(format!("{what} ({})", view.label()), &expected, &actual));
    }
    Ok(())
}
