//! Execution spaces
//!
//! An execution space decides how the work items of a dispatch are run.
//! Every space runs each item exactly once; only ordering and concurrency
//! differ. Reductions combine partial results in an unspecified order, so
//! non-associative combiners are not bit-reproducible across spaces.

use gw_common::warn_once_fn;
use rayon::prelude::*;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

pub trait ExecutionSpace: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;
    /// Largest team size a team policy may request.
    const MAX_TEAM_SIZE: usize;

    /// Number of work items that can make progress at once.
    fn concurrency() -> usize;

    /// Wait for outstanding work. Dispatches here are synchronous, so this
    /// only orders side effects.
    fn fence() {
        std::sync::atomic::fence(std::sync::atomic::Ordering::SeqCst);
    }

    /// Call `f(i, &mut items[i])` for every index.
    fn for_each_mut<T, F>(items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync;

    /// Call `f(i, item)` for every item, consuming the vector.
    fn for_each_owned<T, F>(items: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(usize, T) + Send + Sync;

    /// Combine `map(i)` for every `i` in `range`.
    ///
    /// `identity` must be neutral for `combine`: parallel spaces may fold it
    /// in once per split. An empty range yields `identity`.
    fn reduce<T, M, C>(range: Range<usize>, identity: T, map: M, combine: C) -> T
    where
        T: Copy + Send + Sync,
        M: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync;
}

/// One host thread, items in index order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Serial;

/// Host thread pool (the global rayon pool).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Threads;

/// Accelerator emulation: a dedicated pool with fine-grained scheduling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simt;

impl ExecutionSpace for Serial {
    const NAME: &'static str = "Serial";
    const MAX_TEAM_SIZE: usize = 1;

    fn concurrency() -> usize {
        1
    }

    fn for_each_mut<T, F>(items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        for (i, item) in items.iter_mut().enumerate() {
            f(i, item);
        }
    }

    fn for_each_owned<T, F>(items: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(usize, T) + Send + Sync,
    {
        for (i, item) in items.into_iter().enumerate() {
            f(i, item);
        }
    }

    fn reduce<T, M, C>(range: Range<usize>, identity: T, map: M, combine: C) -> T
    where
        T: Copy + Send + Sync,
        M: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync,
    {
        range.map(map).fold(identity, combine)
    }
}

impl ExecutionSpace for Threads {
    const NAME: &'static str = "Threads";
    const MAX_TEAM_SIZE: usize = 64;

    fn concurrency() -> usize {
        rayon::current_num_threads()
    }

    fn for_each_mut<T, F>(items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        items.par_iter_mut().enumerate().for_each(|(i, item)| f(i, item));
    }

    fn for_each_owned<T, F>(items: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(usize, T) + Send + Sync,
    {
        items.into_par_iter().enumerate().for_each(|(i, item)| f(i, item));
    }

    fn reduce<T, M, C>(range: Range<usize>, identity: T, map: M, combine: C) -> T
    where
        T: Copy + Send + Sync,
        M: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync,
    {
        range.into_par_iter().map(map).reduce(|| identity, combine)
    }
}

fn simt_pool() -> Option<&'static rayon::ThreadPool> {
    static POOL: OnceLock<Option<rayon::ThreadPool>> = OnceLock::new();
    POOL.get_or_init(|| {
        let lanes = std::thread::available_parallelism()
            .map(std::num::NonZero::get)
            .unwrap_or(1)
            .max(2);
        match rayon::ThreadPoolBuilder::new()
            .num_threads(lanes)
            .thread_name(|i| format!("gw-simt-{i}"))
            .build()
        {
            Ok(pool) => {
                tracing::debug!(threads = lanes, "accelerator emulation pool started");
                Some(pool)
            }
            Err(err) => {
                warn_once_fn(
                    "gw_device_simt_pool",
                    &format!("accelerator pool unavailable ({err}); using the global pool"),
                );
                None
            }
        }
    })
    .as_ref()
}

fn on_simt<R: Send>(op: impl FnOnce() -> R + Send) -> R {
    match simt_pool() {
        Some(pool) => pool.install(op),
        None => op(),
    }
}

impl ExecutionSpace for Simt {
    const NAME: &'static str = "Simt";
    const MAX_TEAM_SIZE: usize = 1024;

    fn concurrency() -> usize {
        simt_pool().map_or_else(rayon::current_num_threads, rayon::ThreadPool::current_num_threads)
    }

    fn for_each_mut<T, F>(items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        on_simt(|| {
            items.par_iter_mut().with_max_len(1).enumerate().for_each(|(i, item)| f(i, item));
        });
    }

    fn for_each_owned<T, F>(items: Vec<T>, f: F)
    where
        T: Send,
        F: Fn(usize, T) + Send + Sync,
    {
        on_simt(|| {
            items.into_par_iter().with_max_len(1).enumerate().for_each(|(i, item)| f(i, item));
        });
    }

    fn reduce<T, M, C>(range: Range<usize>, identity: T, map: M, combine: C) -> T
    where
        T: Copy + Send + Sync,
        M: Fn(usize) -> T + Send + Sync,
        C: Fn(T, T) -> T + Send + Sync,
    {
        on_simt(|| range.into_par_iter().with_max_len(1).map(map).reduce(|| identity, combine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn visits_every_item_once<E: ExecutionSpace>() {
        let mut items = vec![0usize; 257];
        E::for_each_mut(&mut items, |i, slot| *slot += i + 1);
        assert!(items.iter().enumerate().all(|(i, &v)| v == i + 1), "{}", E::NAME);

        let seen = AtomicUsize::new(0);
        E::for_each_owned((0..100).collect::<Vec<usize>>(), |i, item| {
            assert_eq!(i, item);
            seen.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(seen.into_inner(), 100);
    }

    #[test]
    fn every_space_visits_each_item_once() {
        visits_every_item_once::<Serial>();
        visits_every_item_once::<Threads>();
        visits_every_item_once::<Simt>();
    }

    #[test]
    fn integer_reductions_agree() {
        let sum = |i: usize| i as u64;
        let add = |a: u64, b: u64| a + b;
        let expected = (0..1000u64).sum::<u64>();
        assert_eq!(Serial::reduce(0..1000, 0, sum, add), expected);
        assert_eq!(Threads::reduce(0..1000, 0, sum, add), expected);
        assert_eq!(Simt::reduce(0..1000, 0, sum, add), expected);
    }

    #[test]
    fn empty_reduction_is_identity() {
        assert_eq!(Threads::reduce(0..0, 7u32, |_| 1, |a, b| a + b), 7);
        assert_eq!(Serial::reduce(3..3, 7u32, |_| 1, |a, b| a + b), 7);
    }

    #[test]
    fn concurrency_is_positive() {
        assert_eq!(Serial::concurrency(), 1);
        assert!(Threads::concurrency() >= 1);
        assert!(Simt::concurrency() >= 1);
    }
}
