use crate::{Mask, Pack, Scalar};

/// View packs as a flat scalar slice of length `packs.len() * N`.
#[inline]
pub fn scalarize<S: Scalar, const N: usize>(packs: &[Pack<S, N>]) -> &[S] {
    bytemuck::cast_slice(packs)
}

#[inline]
pub fn scalarize_mut<S: Scalar, const N: usize>(packs: &mut [Pack<S, N>]) -> &mut [S] {
    bytemuck::cast_slice_mut(packs)
}

/// Lanes of pack `pack_idx` that hold one of the first `n` scalars.
#[inline]
pub fn valid_lanes<const N: usize>(n: usize, pack_idx: usize) -> Mask<N> {
    Mask::first_n(n.saturating_sub(pack_idx * N))
}

/// Pack `values`, padding the tail of the last pack with `fill`.
pub fn pack_scalars<S: Scalar, const N: usize>(values: &[S], fill: S) -> Vec<Pack<S, N>> {
    values
        .chunks(N)
        .map(|chunk| Pack::from_slice_at(chunk, 0, fill))
        .collect()
}

/// The first `n` scalars held by `packs`.
///
/// # Panics
///
/// If `packs` holds fewer than `n` scalars.
pub fn unpack_scalars<S: Scalar, const N: usize>(packs: &[Pack<S, N>], n: usize) -> Vec<S> {
    scalarize(packs)[..n].to_vec()
}
