//! Multi-dimensional views
//!
//! [`View`] owns its storage; [`Unmanaged`] wraps a caller-supplied buffer.
//! Both are row-major and expose the same [`ViewStorage`] interface. Host
//! element access (`Index`, `as_slice`) exists only when the device's
//! memory space is [`HostAccessible`]; dispatch bodies reach storage through
//! [`ViewStorage::slab`] and [`ViewStorageMut::slabs_mut`]. Host code reads
//! an accelerator view through a mirror:
//!
//! ```
//! use gw_device::{Accelerator, View1d, create_mirror_and_copy};
//!
//! let v = View1d::<f64, Accelerator>::new("x", [3]);
//! let host = create_mirror_and_copy(&v);
//! assert_eq!(host.as_slice(), &[0.0; 3]);
//! ```
//!
//! Direct host access to accelerator storage does not compile:
//!
//! ```compile_fail
//! use gw_device::{Accelerator, View1d};
//!
//! let v = View1d::<f64, Accelerator>::new("x", [3]);
//! let _ = v.as_slice();
//! ```

use crate::device::{DefaultDevice, Device};
use crate::memory::HostAccessible;
use gw_common::{GwError, Result};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

const UNMANAGED_LABEL: &str = "<unmanaged>";

/// Shape and storage access shared by managed and unmanaged views.
pub trait ViewStorage<S, const R: usize>: Send + Sync {
    type Device: Device;

    fn label(&self) -> &str;
    fn extents(&self) -> [usize; R];
    /// Raw row-major storage. Only dispatch bodies call this; host code goes
    /// through [`create_mirror_and_copy`](crate::create_mirror_and_copy).
    #[doc(hidden)]
    fn span(&self) -> &[S];

    fn extent(&self, dim: usize) -> usize {
        self.extents()[dim]
    }

    fn size(&self) -> usize {
        self.span().len()
    }

    /// Elements per leading-index slab (product of the trailing extents).
    fn slab_len(&self) -> usize {
        self.extents()[1..].iter().product()
    }

    /// Storage of leading index `i`: a row of a rank-2 view, a matrix of a
    /// rank-3 view, a single element of a rank-1 view.
    fn slab(&self, i: usize) -> &[S] {
        let w = self.slab_len();
        &self.span()[i * w..(i + 1) * w]
    }
}

pub trait ViewStorageMut<S, const R: usize>: ViewStorage<S, R> {
    /// Mutable counterpart of `span`; dispatch bodies only.
    #[doc(hidden)]
    fn span_mut(&mut self) -> &mut [S];

    fn slab_mut(&mut self, i: usize) -> &mut [S] {
        let w = self.slab_len();
        &mut self.span_mut()[i * w..(i + 1) * w]
    }

    /// One disjoint mutable slab per leading index, for handing to teams.
    fn slabs_mut(&mut self) -> Vec<&mut [S]> {
        let n = self.extents()[0];
        let w = self.slab_len();
        if w == 0 {
            return (0..n).map(|_| <&mut [S]>::default()).collect();
        }
        self.span_mut().chunks_exact_mut(w).collect()
    }

    fn fill(&mut self, value: S)
    where
        S: Clone,
    {
        self.span_mut().fill(value);
    }
}

/// Owning, labelled, rank-`R` array resident in `D`'s memory space.
#[derive(Debug, Clone, PartialEq)]
pub struct View<S, const R: usize, D: Device = DefaultDevice> {
    label: String,
    extents: [usize; R],
    pub(crate) data: Vec<S>,
    _device: PhantomData<D>,
}

impl<S: Clone + Default, const R: usize, D: Device> View<S, R, D> {
    /// Allocate a default-initialised view.
    pub fn new(label: impl Into<String>, extents: [usize; R]) -> Self {
        let len = extents.iter().product();
        Self { label: label.into(), extents, data: vec![S::default(); len], _device: PhantomData }
    }
}

impl<S, const R: usize, D: Device> View<S, R, D> {
    /// Allocate a view initialised from host data, row-major.
    pub fn from_vec(label: impl Into<String>, extents: [usize; R], data: Vec<S>) -> Result<Self> {
        let label = label.into();
        let expected: usize = extents.iter().product();
        if data.len() != expected {
            return Err(GwError::shape(label, &[expected], &[data.len()]));
        }
        Ok(Self { label, extents, data, _device: PhantomData })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn extents(&self) -> [usize; R] {
        self.extents
    }

    /// Non-owning view of the same storage.
    pub fn as_unmanaged(&mut self) -> Unmanaged<'_, S, R, D> {
        Unmanaged { extents: self.extents, data: &mut self.data, _device: PhantomData }
    }
}

impl<S, const R: usize, D: Device> View<S, R, D>
where
    D::MemorySpace: HostAccessible,
{
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [S] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<S> {
        self.data
    }
}

impl<S: Send + Sync, const R: usize, D: Device> ViewStorage<S, R> for View<S, R, D> {
    type Device = D;

    fn label(&self) -> &str {
        &self.label
    }

    fn extents(&self) -> [usize; R] {
        self.extents
    }

    fn span(&self) -> &[S] {
        &self.data
    }
}

impl<S: Send + Sync, const R: usize, D: Device> ViewStorageMut<S, R> for View<S, R, D> {
    fn span_mut(&mut self) -> &mut [S] {
        &mut self.data
    }
}

/// Rank-`R` view over a caller-owned buffer.
#[derive(Debug)]
pub struct Unmanaged<'a, S, const R: usize, D: Device = DefaultDevice> {
    extents: [usize; R],
    data: &'a mut [S],
    _device: PhantomData<D>,
}

impl<'a, S, const R: usize, D: Device> Unmanaged<'a, S, R, D> {
    /// Wrap `data`, which must hold exactly the product of `extents` elements.
    pub fn new(data: &'a mut [S], extents: [usize; R]) -> Result<Self> {
        let expected: usize = extents.iter().product();
        if data.len() != expected {
            return Err(GwError::shape(UNMANAGED_LABEL, &[expected], &[data.len()]));
        }
        Ok(Self { extents, data, _device: PhantomData })
    }

    pub fn extents(&self) -> [usize; R] {
        self.extents
    }
}

impl<S: Send + Sync, const R: usize, D: Device> ViewStorage<S, R> for Unmanaged<'_, S, R, D> {
    type Device = D;

    fn label(&self) -> &str {
        UNMANAGED_LABEL
    }

    fn extents(&self) -> [usize; R] {
        self.extents
    }

    fn span(&self) -> &[S] {
        &*self.data
    }
}

impl<S: Send + Sync, const R: usize, D: Device> ViewStorageMut<S, R> for Unmanaged<'_, S, R, D> {
    fn span_mut(&mut self) -> &mut [S] {
        &mut *self.data
    }
}

fn flat_index<const R: usize>(label: &str, extents: &[usize; R], idx: [usize; R]) -> usize {
    let mut offset = 0;
    for (&i, &e) in idx.iter().zip(extents) {
        assert!(i < e, "index {idx:?} out of bounds for view `{label}` with extents {extents:?}");
        offset = offset * e + i;
    }
    offset
}

macro_rules! impl_host_index {
    ($rank:literal, $idx:ty, |$i:ident| $flat:expr) => {
        impl<S, D: Device> Index<$idx> for View<S, $rank, D>
        where
            D::MemorySpace: HostAccessible,
        {
            type Output = S;

            fn index(&self, $i: $idx) -> &S {
                &self.data[flat_index(&self.label, &self.extents, $flat)]
            }
        }

        impl<S, D: Device> IndexMut<$idx> for View<S, $rank, D>
        where
            D::MemorySpace: HostAccessible,
        {
            fn index_mut(&mut self, $i: $idx) -> &mut S {
                let offset = flat_index(&self.label, &self.extents, $flat);
                &mut self.data[offset]
            }
        }

        impl<S, D: Device> Index<$idx> for Unmanaged<'_, S, $rank, D>
        where
            D::MemorySpace: HostAccessible,
        {
            type Output = S;

            fn index(&self, $i: $idx) -> &S {
                &self.data[flat_index(UNMANAGED_LABEL, &self.extents, $flat)]
            }
        }

        impl<S, D: Device> IndexMut<$idx> for Unmanaged<'_, S, $rank, D>
        where
            D::MemorySpace: HostAccessible,
        {
            fn index_mut(&mut self, $i: $idx) -> &mut S {
                let offset = flat_index(UNMANAGED_LABEL, &self.extents, $flat);
                &mut self.data[offset]
            }
        }
    };
}

impl_host_index!(1, usize, |i| [i]);
impl_host_index!(2, (usize, usize), |i| [i.0, i.1]);
impl_host_index!(3, (usize, usize, usize), |i| [i.0, i.1, i.2]);
