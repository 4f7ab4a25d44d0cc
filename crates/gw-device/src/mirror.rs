//! Host mirrors and deep copies

use crate::device::Device;
use crate::space::ExecutionSpace;
use crate::view::{View, ViewStorage, ViewStorageMut};
use gw_common::{GwError, Result};

/// Host-accessible mirror type of a view living on `V::Device`.
pub type HostMirror<S, const R: usize, V> =
    View<S, R, <<V as ViewStorage<S, R>>::Device as Device>::HostMirror>;

/// Allocate a host mirror with `src`'s extents. Contents are not copied.
pub fn create_mirror<S, const R: usize, V>(src: &V) -> HostMirror<S, R, V>
where
    S: Clone + Default,
    V: ViewStorage<S, R>,
{
    View::new(format!("{}_mirror", src.label()), src.extents())
}

/// Allocate a host mirror of `src` and copy its contents.
pub fn create_mirror_and_copy<S, const R: usize, V>(src: &V) -> HostMirror<S, R, V>
where
    S: Clone + Default,
    V: ViewStorage<S, R>,
{
    let mut mirror = create_mirror(src);
    mirror.data.clone_from_slice(src.span());
    mirror
}

/// Copy `src` into `dst`. Extents must match exactly.
pub fn deep_copy<S, const R: usize, Dst, Src>(dst: &mut Dst, src: &Src) -> Result<()>
where
    S: Clone,
    Dst: ViewStorageMut<S, R>,
    Src: ViewStorage<S, R>,
{
    if dst.extents() != src.extents() {
        return Err(GwError::shape(
            format!("deep_copy {} <- {}", dst.label(), src.label()),
            &dst.extents(),
            &src.extents(),
        ));
    }
    dst.span_mut().clone_from_slice(src.span());
    <<Dst::Device as Device>::ExeSpace as ExecutionSpace>::fence();
    Ok(())
}
