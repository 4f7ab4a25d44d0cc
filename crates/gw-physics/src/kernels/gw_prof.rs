use super::{W, check_extents, require_levels};
use crate::consts::{GRAVIT, N2MIN, RAIR};
use crate::{Functions, Lanes};
use gw_common::Result;
use gw_device::{Device, TeamPolicy, ViewStorage, ViewStorageMut};
use gw_pack::{Mask, Scalar, npack, scalarize, valid_lanes};

/// Temperature at interface `k`, linear in pressure between the adjacent
/// midpoints. The top and bottom interfaces take the nearest midpoint value.
///
/// # Panics
///
/// If `pver` is zero or a profile is shorter than the column.
pub(crate) fn interface_temperature<S: Scalar>(
    pver: usize,
    t: &[S],
    pmid: &[S],
    pint: &[S],
    k: usize,
) -> S {
    debug_assert!(pver > 0, "interface temperature of an empty column");
    if k == 0 {
        t[0]
    } else if k >= pver {
        t[pver - 1]
    } else {
        let w = (pint[k] - pmid[k - 1]) / (pmid[k] - pmid[k - 1]);
        t[k - 1] + (t[k] - t[k - 1]) * w
    }
}

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Interface density and interface/midpoint buoyancy frequency.
    ///
    /// `t` and `pmid` are `[ncol, npack(pver)]`, `pint`, `rhoi` and `ni` are
    /// `[ncol, npack(pver + 1)]`, `nm` is `[ncol, npack(pver)]`. Padding
    /// lanes of the outputs are zeroed.
    #[allow(clippy::too_many_arguments)]
    pub fn gw_prof(
        policy: &TeamPolicy<D>,
        pver: usize,
        cpair: S,
        t: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        pmid: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        pint: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        rhoi: &mut impl ViewStorageMut<Lanes<S>, 2, Device = D>,
        ni: &mut impl ViewStorageMut<Lanes<S>, 2, Device = D>,
        nm: &mut impl ViewStorageMut<Lanes<S>, 2, Device = D>,
    ) -> Result<()> {
        require_levels(pver)?;
        let ncol = policy.league_size();
        let (nmid, nint) = (npack::<W>(pver), npack::<W>(pver + 1));
        check_extents("t", t, [ncol, nmid])?;
        check_extents("pmid", pmid, [ncol, nmid])?;
        check_extents("pint", pint, [ncol, nint])?;
        check_extents("rhoi", &*rhoi, [ncol, nint])?;
        check_extents("ni", &*ni, [ncol, nint])?;
        check_extents("nm", &*nm, [ncol, nmid])?;

        let items: Vec<_> = rhoi
            .slabs_mut()
            .into_iter()
            .zip(ni.slabs_mut())
            .zip(nm.slabs_mut())
            .map(|((rhoi, ni), nm)| (rhoi, ni, nm))
            .collect();
        policy.for_each_team(items, |team, (rhoi, ni, nm)| {
            let col = team.league_rank();
            let column = Column { pver, t: t.slab(col), pmid: pmid.slab(col), pint: pint.slab(col) };
            column.profile(cpair, rhoi, ni, nm);
        })?;
        tracing::debug!(device = D::NAME, ncol, pver, "gw_prof dispatched");
        Ok(())
    }
}

struct Column<'a, S: Scalar> {
    pver: usize,
    t: &'a [Lanes<S>],
    pmid: &'a [Lanes<S>],
    pint: &'a [Lanes<S>],
}

impl<S: Scalar> Column<'_, S> {
    fn profile(&self, cpair: S, rhoi: &mut [Lanes<S>], ni: &mut [Lanes<S>], nm: &mut [Lanes<S>]) {
        let pver = self.pver;
        let ts = &scalarize(self.t)[..pver];
        let pms = &scalarize(self.pmid)[..pver];
        let pis = &scalarize(self.pint)[..pver + 1];
        let g2 = Lanes::splat(S::from_f64(GRAVIT * GRAVIT));
        let rair = S::from_f64(RAIR);
        let n2min = S::from_f64(N2MIN);
        let inv_cp = Lanes::splat(S::ONE / cpair);
        let zero = Lanes::splat(S::ZERO);

        for (p, (rho_p, ni_p)) in rhoi.iter_mut().zip(ni.iter_mut()).enumerate() {
            let base = p * W;
            let at = base as isize;
            let interior = Mask::from_fn(|l| (1..pver).contains(&(base + l)));
            let ti = Lanes::from_fn(|l| {
                let k = base + l;
                if k <= pver { interface_temperature(pver, ts, pms, pis, k) } else { S::ONE }
            });
            let rho = Lanes::from_slice_at(pis, at, S::ONE) / (ti * rair);

            let dt = Lanes::from_slice_at(ts, at, S::ZERO) - Lanes::from_slice_at(ts, at - 1, S::ZERO);
            let dp = Lanes::from_slice_at(pms, at, S::ONE) - Lanes::from_slice_at(pms, at - 1, S::ZERO);
            let n2 = g2 / ti * (inv_cp - rho * (dt / dp));
            let ni_interior = n2.max(n2min).sqrt();
            let ni_boundary = (g2 / (ti * cpair)).sqrt();

            let valid = valid_lanes::<W>(pver + 1, p);
            *rho_p = Lanes::select(valid, rho, zero);
            *ni_p = Lanes::select(valid, Lanes::select(interior, ni_interior, ni_boundary), zero);
        }

        let nis = &scalarize(&*ni)[..pver + 1];
        let half = S::from_f64(0.5);
        for (p, nm_p) in nm.iter_mut().enumerate() {
            let at = (p * W) as isize;
            let mid = (Lanes::from_slice_at(nis, at, S::ZERO)
                + Lanes::from_slice_at(nis, at + 1, S::ZERO))
                * half;
            *nm_p = Lanes::select(valid_lanes::<W>(pver, p), mid, zero);
        }
    }
}
