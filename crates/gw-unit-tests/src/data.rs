//! Random column profiles and conversion to and from packed views.

use crate::Spack;
use gw_common::{Real, Result, SMALL_PACK_SIZE};
use gw_device::{Device, View1d, View2d, View3d, ViewStorage, create_mirror_and_copy};
use gw_pack::{npack, pack_scalars, unpack_scalars};
use rand::Rng;

/// Per-column atmospheric state, scalar and unpadded. Level 0 is the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Profiles {
    pub pver: usize,
    /// Midpoint temperature (K).
    pub t: Vec<Vec<Real>>,
    /// Midpoint pressure (Pa).
    pub pmid: Vec<Vec<Real>>,
    /// Interface pressure (Pa), `pver + 1` levels.
    pub pint: Vec<Vec<Real>>,
    /// Midpoint pressure thickness (Pa).
    pub dpm: Vec<Vec<Real>>,
    /// Midpoint height (m).
    pub zm: Vec<Vec<Real>>,
    /// Net heating rate (K/s).
    pub netdt: Vec<Vec<Real>>,
    /// Midpoint wind (m/s).
    pub ubm: Vec<Vec<Real>>,
    /// Interface wind (m/s), `pver + 1` levels.
    pub ubi: Vec<Vec<Real>>,
}

impl Profiles {
    pub fn generate(rng: &mut impl Rng, ncol: usize, pver: usize) -> Self {
        let mut p = Profiles {
            pver,
            t: Vec::with_capacity(ncol),
            pmid: Vec::with_capacity(ncol),
            pint: Vec::with_capacity(ncol),
            dpm: Vec::with_capacity(ncol),
            zm: Vec::with_capacity(ncol),
            netdt: Vec::with_capacity(ncol),
            ubm: Vec::with_capacity(ncol),
            ubi: Vec::with_capacity(ncol),
        };
        for _ in 0..ncol {
            let ptop: f64 = rng.random_range(100.0..500.0);
            let psurf: f64 = rng.random_range(9.5e4..1.03e5);
            let pint: Vec<f64> = (0..=pver)
                .map(|k| ptop + (psurf - ptop) * k as f64 / pver as f64)
                .collect();
            let pmid: Vec<f64> = pint.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
            let ubm: Vec<f64> = (0..pver).map(|_| rng.random_range(-30.0..30.0)).collect();

            let lapse = 80.0 / pver as f64;
            p.t.push(real((0..pver).map(|k| 210.0 + lapse * k as f64 + rng.random_range(-5.0..5.0))));
            p.zm.push(real(pmid.iter().map(|&pm| 7.0e3 * (psurf / pm).ln())));
            p.netdt.push(real((0..pver).map(|_| rng.random_range(-2.0e-5..4.0e-5))));
            p.dpm.push(real(pint.windows(2).map(|w| w[1] - w[0])));
            p.ubi.push(real((0..=pver).map(|k| match k {
                0 => ubm[0],
                k if k == pver => ubm[pver - 1],
                k => 0.5 * (ubm[k - 1] + ubm[k]),
            })));
            p.ubm.push(real(ubm));
            p.pint.push(real(pint));
            p.pmid.push(real(pmid));
        }
        p
    }

    pub fn ncol(&self) -> usize {
        self.t.len()
    }
}

fn real(values: impl IntoIterator<Item = f64>) -> Vec<Real> {
    values.into_iter().map(|v| v as Real).collect()
}

/// Pack each column into one row of a `[ncol, npack(nlev)]` view.
pub fn to_packed_view<D: Device>(label: &str, columns: &[Vec<Real>]) -> Result<View2d<Spack, D>> {
    let nlev = columns.first().map_or(0, Vec::len);
    let width = npack::<SMALL_PACK_SIZE>(nlev);
    let data = columns.iter().flat_map(|c| pack_scalars(c, 0.0)).collect();
    View2d::from_vec(label, [columns.len(), width], data)
}

/// Unpack the first `nlev` scalars of every row, via a host mirror.
pub fn from_packed_view<V: ViewStorage<Spack, 2>>(view: &V, nlev: usize) -> Vec<Vec<Real>> {
    let mirror = create_mirror_and_copy(view);
    mirror.as_slice().chunks(view.extent(1).max(1)).map(|row| unpack_scalars(row, nlev)).collect()
}

/// Pack `tables[col][row]` into a `[ncol, nrow, npack(nlev)]` view.
pub fn to_packed_view3d<D: Device>(
    label: &str,
    tables: &[Vec<Vec<Real>>],
) -> Result<View3d<Spack, D>> {
    let nrow = tables.first().map_or(0, Vec::len);
    let nlev = tables.iter().flatten().next().map_or(0, Vec::len);
    let width = npack::<SMALL_PACK_SIZE>(nlev);
    let data = tables.iter().flatten().flat_map(|row| pack_scalars(row, 0.0)).collect();
    View3d::from_vec(label, [tables.len(), nrow, width], data)
}

pub fn from_packed_view3d<V: ViewStorage<Spack, 3>>(view: &V, nlev: usize) -> Vec<Vec<Vec<Real>>> {
    let [_, nrow, width] = view.extents();
    let mirror = create_mirror_and_copy(view);
    mirror
        .as_slice()
        .chunks(width.max(1))
        .map(|row| unpack_scalars(row, nlev))
        .collect::<Vec<_>>()
        .chunks(nrow.max(1))
        .map(<[Vec<Real>]>::to_vec)
        .collect()
}

pub fn to_view1d<T, D: Device>(label: &str, values: Vec<T>) -> Result<View1d<T, D>> {
    View1d::from_vec(label, [values.len()], values)
}

pub fn from_view1d<T: Clone + Default, V: ViewStorage<T, 1>>(view: &V) -> Vec<T> {
    create_mirror_and_copy(view).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_device::{Accelerator, HostSerial};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn profiles_are_physically_ordered() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = Profiles::generate(&mut rng, 2, 9);
        assert_eq!(p.ncol(), 2);
        for c in 0..2 {
            assert_eq!(p.pint[c].len(), 10);
            assert!(p.pint[c].windows(2).all(|w| w[0] < w[1]));
            assert!(p.pmid[c].iter().zip(&p.pint[c]).all(|(m, i)| m > i));
            assert!(p.zm[c].windows(2).all(|w| w[0] > w[1]));
            assert!(p.dpm[c].iter().all(|&d| d > 0.0));
        }
    }

    #[test]
    fn packed_round_trip_through_device_memory() {
        let cols: Vec<Vec<Real>> = vec![(0..6).map(|k| k as Real).collect(), vec![9.0; 6]];
        let view = to_packed_view::<Accelerator>("t", &cols).unwrap();
        assert_eq!(view.extents(), [2, npack::<SMALL_PACK_SIZE>(6)]);
        assert_eq!(from_packed_view(&view, 6), cols);

        let tables = vec![vec![vec![1.0; 5], vec![2.0; 5]]; 2];
        let view = to_packed_view3d::<Accelerator>("tau", &tables).unwrap();
        assert_eq!(from_packed_view3d(&view, 5), tables);

        let idx = to_view1d::<usize, HostSerial>("maxi", vec![3, 1]).unwrap();
        assert_eq!(from_view1d(&idx), vec![3, 1]);
    }
}
