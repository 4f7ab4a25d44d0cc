use crate::{Mask, Scalar};
use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// `N` lanes of `S` operated on as one value.
#[derive(Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Pack<S, const N: usize>([S; N]);

// SAFETY: `Pack` is `repr(transparent)` over `[S; N]`, which has no padding
// and is zeroable/pod whenever `S` is.
unsafe impl<S: Zeroable, const N: usize> Zeroable for Pack<S, N> {}
// SAFETY: see above; `S: Pod` implies `S: Copy + 'static`.
unsafe impl<S: Pod, const N: usize> Pod for Pack<S, N> {}

impl<S, const N: usize> Pack<S, N> {
    /// Lane count.
    pub const N: usize = N;

    #[inline]
    pub const fn from_array(lanes: [S; N]) -> Self {
        Self(lanes)
    }

    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> S) -> Self {
        Self(std::array::from_fn(f))
    }

    #[inline]
    pub fn as_array(&self) -> &[S; N] {
        &self.0
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> &mut [S; N] {
        &mut self.0
    }

    #[inline]
    pub fn into_array(self) -> [S; N] {
        self.0
    }
}

impl<S: Scalar, const N: usize> Pack<S, N> {
    #[inline]
    pub fn splat(value: S) -> Self {
        Self([value; N])
    }

    /// `start, start + 1, ..., start + N - 1`.
    #[inline]
    pub fn range(start: S) -> Self {
        Self::from_fn(|i| start + S::from_f64(i as f64))
    }

    /// Gather `slice[start + i]` into lane `i`, using `fill` for indices
    /// outside `0..slice.len()`.
    #[inline]
    pub fn from_slice_at(slice: &[S], start: isize, fill: S) -> Self {
        Self::from_fn(|i| {
            let idx = start + i as isize;
            if idx >= 0 && (idx as usize) < slice.len() { slice[idx as usize] } else { fill }
        })
    }

    /// Write the first `min(N, out.len())` lanes into `out`.
    #[inline]
    pub fn store_partial(&self, out: &mut [S]) {
        let n = out.len().min(N);
        out[..n].copy_from_slice(&self.0[..n]);
    }

    /// Lane-wise `if mask { on_true } else { on_false }`.
    #[inline]
    pub fn select(mask: Mask<N>, on_true: Self, on_false: Self) -> Self {
        Self::from_fn(|i| if mask.get(i) { on_true.0[i] } else { on_false.0[i] })
    }

    /// Assign `value` to the lanes set in `mask`.
    #[inline]
    pub fn set(&mut self, mask: Mask<N>, value: impl Into<Self>) {
        let value = value.into();
        for (i, lane) in self.0.iter_mut().enumerate() {
            if mask.get(i) {
                *lane = value.0[i];
            }
        }
    }

    #[inline]
    fn map(self, f: impl Fn(S) -> S) -> Self {
        Self::from_fn(|i| f(self.0[i]))
    }

    #[inline]
    fn zip(self, rhs: Self, f: impl Fn(S, S) -> S) -> Self {
        Self::from_fn(|i| f(self.0[i], rhs.0[i]))
    }

    #[inline]
    fn cmp_with(&self, rhs: Self, f: impl Fn(S, S) -> bool) -> Mask<N> {
        Mask::from_fn(|i| f(self.0[i], rhs.0[i]))
    }

    pub fn sqrt(self) -> Self {
        self.map(S::sqrt)
    }

    pub fn abs(self) -> Self {
        self.map(S::abs)
    }

    pub fn trunc(self) -> Self {
        self.map(S::trunc)
    }

    pub fn square(self) -> Self {
        self * self
    }

    pub fn max(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), S::max)
    }

    pub fn min(self, rhs: impl Into<Self>) -> Self {
        self.zip(rhs.into(), S::min)
    }

    pub fn lt(&self, rhs: impl Into<Self>) -> Mask<N> {
        self.cmp_with(rhs.into(), |a, b| a < b)
    }

    pub fn le(&self, rhs: impl Into<Self>) -> Mask<N> {
        self.cmp_with(rhs.into(), |a, b| a <= b)
    }

    pub fn gt(&self, rhs: impl Into<Self>) -> Mask<N> {
        self.cmp_with(rhs.into(), |a, b| a > b)
    }

    pub fn ge(&self, rhs: impl Into<Self>) -> Mask<N> {
        self.cmp_with(rhs.into(), |a, b| a >= b)
    }

    pub fn eq_lanes(&self, rhs: impl Into<Self>) -> Mask<N> {
        self.cmp_with(rhs.into(), |a, b| a == b)
    }

    pub fn is_finite(&self) -> Mask<N> {
        Mask::from_fn(|i| self.0[i].is_finite())
    }

    /// Sum of all lanes, lane 0 first.
    pub fn reduce_sum(&self) -> S {
        self.0.iter().fold(S::ZERO, |acc, &v| acc + v)
    }

    pub fn reduce_max(&self) -> S {
        self.0.iter().fold(S::MIN, |acc, &v| acc.max(v))
    }

    pub fn reduce_min(&self) -> S {
        self.0.iter().fold(S::MAX, |acc, &v| acc.min(v))
    }

    /// Sum over the lanes set in `mask`; zero if none.
    pub fn masked_reduce_sum(&self, mask: Mask<N>) -> S {
        self.masked_fold(mask, S::ZERO, |a, b| a + b)
    }

    /// Maximum over the lanes set in `mask`, or `identity` if none.
    pub fn masked_reduce_max(&self, mask: Mask<N>, identity: S) -> S {
        self.masked_fold(mask, identity, S::max)
    }

    /// Minimum over the lanes set in `mask`, or `identity` if none.
    pub fn masked_reduce_min(&self, mask: Mask<N>, identity: S) -> S {
        self.masked_fold(mask, identity, S::min)
    }

    fn masked_fold(&self, mask: Mask<N>, init: S, f: impl Fn(S, S) -> S) -> S {
        self.0
            .iter()
            .zip(mask.iter())
            .filter(|(_, on)| *on)
            .fold(init, |acc, (&v, _)| f(acc, v))
    }
}

impl<S: Scalar, const N: usize> Default for Pack<S, N> {
    fn default() -> Self {
        Self::splat(S::default())
    }
}

impl<S: Scalar, const N: usize> From<S> for Pack<S, N> {
    #[inline]
    fn from(value: S) -> Self {
        Self::splat(value)
    }
}

impl<S: fmt::Debug, const N: usize> fmt::Debug for Pack<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<S, const N: usize> Index<usize> for Pack<S, N> {
    type Output = S;

    #[inline]
    fn index(&self, lane: usize) -> &S {
        &self.0[lane]
    }
}

impl<S, const N: usize> IndexMut<usize> for Pack<S, N> {
    #[inline]
    fn index_mut(&mut self, lane: usize) -> &mut S {
        &mut self.0[lane]
    }
}

impl<S: Scalar, const N: usize> Neg for Pack<S, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

macro_rules! binary_ops {
    ($($trait:ident :: $method:ident, $assign_trait:ident :: $assign_method:ident, $op:tt);* $(;)?) => {
        $(
            impl<S: Scalar, const N: usize> $trait for Pack<S, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    self.zip(rhs, |a, b| a $op b)
                }
            }

            impl<S: Scalar, const N: usize> $trait<S> for Pack<S, N> {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: S) -> Self {
                    self.map(|a| a $op rhs)
                }
            }

            impl<S: Scalar, const N: usize> $assign_trait for Pack<S, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }

            impl<S: Scalar, const N: usize> $assign_trait<S> for Pack<S, N> {
                #[inline]
                fn $assign_method(&mut self, rhs: S) {
                    *self = *self $op rhs;
                }
            }

            impl<const N: usize> $trait<Pack<f64, N>> for f64 {
                type Output = Pack<f64, N>;

                #[inline]
                fn $method(self, rhs: Pack<f64, N>) -> Pack<f64, N> {
                    Pack::splat(self) $op rhs
                }
            }

            impl<const N: usize> $trait<Pack<f32, N>> for f32 {
                type Output = Pack<f32, N>;

                #[inline]
                fn $method(self, rhs: Pack<f32, N>) -> Pack<f32, N> {
                    Pack::splat(self) $op rhs
                }
            }
        )*
    };
}

binary_ops! {
    Add::add, AddAssign::add_assign, +;
    Sub::sub, SubAssign::sub_assign, -;
    Mul::mul, MulAssign::mul_assign, *;
    Div::div, DivAssign::div_assign, /;
}
