//! Dispatch policies
//!
//! A [`TeamPolicy`] runs one team per league rank; each team receives a
//! [`TeamMember`] handle and exclusive ownership of its work item. Team
//! threads are executed in lock-step by a single worker, so team-level
//! loops and reductions are sequential and deterministic.

use crate::device::{DefaultDevice, Device};
use crate::space::ExecutionSpace;
use gw_common::{GwError, Result};
use std::marker::PhantomData;
use std::ops::Range;

type Space<D> = <D as Device>::ExeSpace;

/// One-dimensional index range dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePolicy<D: Device = DefaultDevice> {
    begin: usize,
    end: usize,
    _device: PhantomData<D>,
}

impl<D: Device> RangePolicy<D> {
    /// `begin..end`; an inverted range is empty.
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end: end.max(begin), _device: PhantomData }
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Call `f(begin + i, &mut data[i])` for each index. `data` must have
    /// exactly `len()` elements.
    pub fn parallel_for_mut<T, F>(&self, data: &mut [T], f: F) -> Result<()>
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        if data.len() != self.len() {
            return Err(GwError::shape("range policy data", &[self.len()], &[data.len()]));
        }
        let begin = self.begin;
        <Space<D> as ExecutionSpace>::for_each_mut(data, |i, item| f(begin + i, item));
        Ok(())
    }

    /// Reduce `map` over the range. See [`ExecutionSpace::reduce`].
    pub fn parallel_reduce<T, M, C>(&self, identity: T, map: M, combine: C) -> T
    where
        T: Copy + Send + Sync,
        M: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync,
    {
        <Space<D> as ExecutionSpace>::reduce(self.range(), identity, map, combine)
    }
}

/// League-of-teams dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPolicy<D: Device = DefaultDevice> {
    league_size: usize,
    team_size: usize,
    _device: PhantomData<D>,
}

impl<D: Device> TeamPolicy<D> {
    /// `team_size` is clamped to `1..=MAX_TEAM_SIZE` of the execution space.
    pub fn new(league_size: usize, team_size: usize) -> Self {
        let team_size = team_size.clamp(1, <Space<D> as ExecutionSpace>::MAX_TEAM_SIZE);
        Self { league_size, team_size, _device: PhantomData }
    }

    /// Policy sized for `work_per_team` inner iterations per team.
    pub fn for_work(league_size: usize, work_per_team: usize) -> Self {
        Self::new(league_size, work_per_team)
    }

    pub fn league_size(&self) -> usize {
        self.league_size
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Run `f` once per league rank with that rank's item.
    pub fn for_each_team<T, F>(&self, items: Vec<T>, f: F) -> Result<()>
    where
        T: Send,
        F: Fn(&TeamMember<D>, T) + Send + Sync,
    {
        if items.len() != self.league_size {
            return Err(GwError::LeagueMismatch {
                expected: self.league_size,
                actual: items.len(),
            });
        }
        let (league_size, team_size) = (self.league_size, self.team_size);
        <Space<D> as ExecutionSpace>::for_each_owned(items, |league_rank, item| {
            let member = TeamMember { league_rank, league_size, team_size, _device: PhantomData };
            f(&member, item);
        });
        Ok(())
    }
}

/// Handle given to each team of a [`TeamPolicy`] dispatch.
#[derive(Debug)]
pub struct TeamMember<D: Device = DefaultDevice> {
    league_rank: usize,
    league_size: usize,
    team_size: usize,
    _device: PhantomData<D>,
}

impl<D: Device> TeamMember<D> {
    pub fn league_rank(&self) -> usize {
        self.league_rank
    }

    pub fn league_size(&self) -> usize {
        self.league_size
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Team-level loop over `0..n`.
    pub fn team_for(&self, n: usize, mut f: impl FnMut(usize)) {
        for i in 0..n {
            f(i);
        }
    }

    /// Team-level reduction over `0..n`, combined in index order.
    pub fn team_reduce<T>(
        &self,
        n: usize,
        init: T,
        map: impl Fn(usize) -> T,
        combine: impl Fn(T, T) -> T,
    ) -> T {
        (0..n).map(map).fold(init, combine)
    }

    pub fn team_barrier(&self) {}
}
