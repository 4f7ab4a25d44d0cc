//! Every bridge alias resolves and behaves the same for every device.

use gw_device::*;
use gw_pack::{Pack, scalarize, scalarize_mut};
use proptest::prelude::*;

type P = Pack<f64, 4>;

/// Uses every alias of the bridge for `D` together.
fn exercise_bridge<D: Device>(ncol: usize, nlev: usize) -> Vec<f64> {
    let npack = nlev.div_ceil(P::N);
    let input: Vec<P> = (0..ncol * npack).map(|i| P::range(i as f64 * 4.0)).collect();

    let src: View2d<P, D> = View2d::from_vec("src", [ncol, npack], input).unwrap();
    let mut dst: <TypeBridge<D> as DeviceTypes>::View2d<P> = View2d::<P, D>::new("dst", [ncol, npack]);
    let policy: <TypeBridge<D> as DeviceTypes>::TeamPolicy = TeamPolicy::new(ncol, nlev);

    policy
        .for_each_team(dst.slabs_mut(), |team: &MemberType<D>, row| {
            let col = team.league_rank();
            let src_row = scalarize(src.slab(col));
            let out = scalarize_mut(row);
            team.team_for(nlev, |k| out[k] = 2.0 * src_row[k] + col as f64);
        })
        .unwrap();
    <ExeSpace<D> as ExecutionSpace>::fence();

    let mut scratch = vec![P::splat(0.0); ncol * npack];
    {
        let mut alias: Uview2d<'_, P, D> = Unmanaged::new(&mut scratch, [ncol, npack]).unwrap();
        deep_copy(&mut alias, &dst).unwrap();
    }

    let mirror = create_mirror_and_copy(&dst);
    let mirror_scalars = scalarize(mirror.as_slice());
    assert_eq!(scalarize(&scratch), mirror_scalars);

    (0..ncol).flat_map(|c| mirror_scalars[c * npack * P::N..][..nlev].to_vec()).collect()
}

#[test]
fn bridge_is_consistent_across_devices() {
    let serial = exercise_bridge::<HostSerial>(3, 9);
    let threads = exercise_bridge::<HostThreads>(3, 9);
    let accel = exercise_bridge::<Accelerator>(3, 9);
    assert_eq!(serial, threads);
    assert_eq!(serial, accel);
    assert_eq!(serial[0], 0.0);
    assert_eq!(serial[9], 2.0 * 12.0 + 1.0);
}

#[test]
fn default_device_is_one_of_the_three() {
    assert!(device_names().contains(&DefaultDevice::NAME));
    let v: View1d<f64> = View1d::new("default", [2]);
    assert_eq!(ViewStorage::extents(&v), [2]);
}

#[test]
fn rank3_views_dispatch_by_leading_index() {
    fn run<D: Device>() -> Vec<f64> {
        let mut tau: View3d<f64, D> = View3d::new("tau", [2, 3, 4]);
        TeamPolicy::<D>::new(2, 3)
            .for_each_team(tau.slabs_mut(), |team, slab| {
                for (l, row) in slab.chunks_exact_mut(4).enumerate() {
                    row.fill((team.league_rank() * 10 + l) as f64);
                }
            })
            .unwrap();
        create_mirror_and_copy(&tau).into_vec()
    }
    let serial = run::<HostSerial>();
    assert_eq!(serial, run::<Accelerator>());
    let host = View3d::<f64, HostSerial>::from_vec("h", [2, 3, 4], serial).unwrap();
    assert_eq!(host[(1, 2, 3)], 12.0);
    assert_eq!(host[(0, 1, 0)], 1.0);
}

#[test]
fn parallel_max_reduction_matches_serial() {
    let data: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64).collect();
    let max = |n: usize| data[n];
    let serial = RangePolicy::<HostSerial>::new(0, 500).parallel_reduce(f64::MIN, max, f64::max);
    let threads = RangePolicy::<HostThreads>::new(0, 500).parallel_reduce(f64::MIN, max, f64::max);
    let accel = RangePolicy::<Accelerator>::new(0, 500).parallel_reduce(f64::MIN, max, f64::max);
    assert_eq!(serial, 100.0);
    assert_eq!(threads, serial);
    assert_eq!(accel, serial);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn team_dispatch_is_device_independent(ncol in 1usize..6, nlev in 1usize..40) {
        let serial = exercise_bridge::<HostSerial>(ncol, nlev);
        prop_assert_eq!(serial.len(), ncol * nlev);
        prop_assert_eq!(&serial, &exercise_bridge::<HostThreads>(ncol, nlev));
        prop_assert_eq!(&serial, &exercise_bridge::<Accelerator>(ncol, nlev));
    }
}
