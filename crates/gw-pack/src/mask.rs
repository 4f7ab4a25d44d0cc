use std::ops::{BitAnd, BitOr, Not};

/// Per-lane boolean companion of [`crate::Pack`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mask<const N: usize>([bool; N]);

impl<const N: usize> Mask<N> {
    pub const N: usize = N;

    #[inline]
    pub const fn splat(value: bool) -> Self {
        Self([value; N])
    }

    #[inline]
    pub const fn from_array(lanes: [bool; N]) -> Self {
        Self(lanes)
    }

    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        Self(std::array::from_fn(f))
    }

    /// Lanes `0..n` set, the rest clear. `n >= N` sets every lane.
    #[inline]
    pub fn first_n(n: usize) -> Self {
        Self::from_fn(|i| i < n)
    }

    #[inline]
    pub fn get(&self, lane: usize) -> bool {
        self.0[lane]
    }

    #[inline]
    pub fn set(&mut self, lane: usize, value: bool) {
        self.0[lane] = value;
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&b| b)
    }

    pub fn all(&self) -> bool {
        self.0.iter().all(|&b| b)
    }

    pub fn none(&self) -> bool {
        !self.any()
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Lowest set lane.
    pub fn first_set(&self) -> Option<usize> {
        self.0.iter().position(|&b| b)
    }

    /// Highest set lane.
    pub fn last_set(&self) -> Option<usize> {
        self.0.iter().rposition(|&b| b)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn to_array(self) -> [bool; N] {
        self.0
    }
}

impl<const N: usize> Default for Mask<N> {
    fn default() -> Self {
        Self::splat(false)
    }
}

impl<const N: usize> BitAnd for Mask<N> {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] && rhs.0[i])
    }
}

impl<const N: usize> BitOr for Mask<N> {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_fn(|i| self.0[i] || rhs.0[i])
    }
}

impl<const N: usize> Not for Mask<N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_fn(|i| !self.0[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_n_saturates() {
        assert_eq!(Mask::<4>::first_n(0), Mask::splat(false));
        assert_eq!(Mask::<4>::first_n(2).to_array(), [true, true, false, false]);
        assert!(Mask::<4>::first_n(9).all());
    }

    #[test]
    fn set_lane_queries() {
        let m = Mask::<8>::from_fn(|i| i == 2 || i == 5);
        assert_eq!(m.count(), 2);
        assert_eq!(m.first_set(), Some(2));
        assert_eq!(m.last_set(), Some(5));
        assert!(Mask::<8>::default().none());
        assert_eq!(Mask::<8>::default().first_set(), None);
    }

    #[test]
    fn boolean_algebra() {
        let a = Mask::<4>::from_array([true, true, false, false]);
        let b = Mask::<4>::from_array([true, false, true, false]);
        assert_eq!((a & b).to_array(), [true, false, false, false]);
        assert_eq!((a | b).to_array(), [true, true, true, false]);
        assert_eq!((!a).to_array(), [false, false, true, true]);
    }
}
