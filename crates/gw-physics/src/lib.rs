//! Gravity-wave drag kernels
//!
//! All kernels hang off [`Functions<S, D>`], a zero-sized type parameterised
//! on the scalar type and the [`Device`] whose execution space runs them.
//! Level data is stored in packs of [`SMALL_PACK_SIZE`] lanes, one row per
//! column, with the model top at level 0.
//!
//! Which types the module exposes is decided by `kernel_types.toml` at build
//! time; see [`capabilities`].

use gw_common::{Real, SMALL_PACK_SIZE};
use gw_device::{DefaultDevice, Device};
use gw_pack::{Pack, Scalar};
use std::marker::PhantomData;

pub mod capabilities;
pub mod consts;
mod init;
mod kernels;
#[cfg(any(test, feature = "unit-test-access"))]
pub mod testing;

pub use init::{GwCommon, GwInit, live_inits};
pub use kernels::WARNING_KEYS;

#[cfg(gw_exposes = "C")]
pub use consts as C;

/// Scalar type the kernels are instantiated with by default.
#[cfg(gw_exposes = "Scalar")]
pub type KernelScalar = Real;

/// Packed scalar used for level data.
#[cfg(gw_exposes = "Spack")]
pub type Spack<S = Real> = Pack<S, SMALL_PACK_SIZE>;

/// Lane mask matching [`Spack`].
#[cfg(gw_exposes = "Smask")]
pub type Smask = gw_pack::Mask<SMALL_PACK_SIZE>;

/// Per-wave table such as the phase-speed spectrum.
#[cfg(gw_exposes = "view_1d_table")]
pub type CrefTable<S = Real, D = DefaultDevice> = gw_device::View1d<S, D>;

pub(crate) type Lanes<S> = Pack<S, SMALL_PACK_SIZE>;

/// Kernel entry points for scalar `S` on device `D`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Functions<S: Scalar = Real, D: Device = DefaultDevice>(PhantomData<(S, D)>);

/// Types a kernel instantiation operates on.
pub trait KernelTypes {
    type Scalar: Scalar;
    type Device: Device;
    #[cfg(gw_exposes = "Spack")]
    type Spack;
    #[cfg(gw_exposes = "Smask")]
    type Smask;
    #[cfg(gw_exposes = "view_1d_table")]
    type CrefTable;
}

impl<S: Scalar, D: Device> KernelTypes for Functions<S, D> {
    type Scalar = S;
    type Device = D;
    #[cfg(gw_exposes = "Spack")]
    type Spack = Spack<S>;
    #[cfg(gw_exposes = "Smask")]
    type Smask = Smask;
    #[cfg(gw_exposes = "view_1d_table")]
    type CrefTable = CrefTable<S, D>;
}

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Lanes per pack.
    pub const PACK_SIZE: usize = SMALL_PACK_SIZE;

    /// Packs per column needed for `nlev` levels.
    pub const fn num_packs(nlev: usize) -> usize {
        gw_pack::npack::<SMALL_PACK_SIZE>(nlev)
    }
}
