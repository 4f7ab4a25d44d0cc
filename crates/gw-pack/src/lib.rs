//! Fixed-width scalar packs
//!
//! A [`Pack<S, N>`] is `N` lanes of a floating-point scalar that kernels
//! operate on as one value. Comparisons produce a [`Mask<N>`], which drives
//! masked assignment and masked reductions. Arrays of packs can be viewed as
//! flat scalar slices with [`scalarize`]; only the first `n` scalars of such
//! a slice are meaningful when `n` is not a multiple of `N`.

mod mask;
mod pack;
mod packed;
mod scalar;

pub use mask::Mask;
pub use pack::Pack;
pub use packed::{pack_scalars, scalarize, scalarize_mut, unpack_scalars, valid_lanes};
pub use scalar::Scalar;

/// Number of `N`-lane packs needed to hold `n` scalars.
#[inline]
pub const fn npack<const N: usize>(n: usize) -> usize {
    n.div_ceil(N)
}
