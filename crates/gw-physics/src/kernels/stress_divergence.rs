use super::{W, check_extents, require_levels};
use crate::consts::GRAVIT;
use crate::{Functions, GwCommon, Lanes};
use gw_common::Result;
use gw_device::{Device, TeamPolicy, ViewStorage, ViewStorageMut};
use gw_pack::{Scalar, npack, scalarize, valid_lanes};

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Wind tendency from the vertical divergence of the wave stress,
    /// summed over the spectrum and scaled by `effgw`.
    pub fn gwd_compute_tendencies_from_stress_divergence(
        policy: &TeamPolicy<D>,
        common: &GwCommon<S>,
        pver: usize,
        dpm: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        tau: &impl ViewStorage<Lanes<S>, 3, Device = D>,
        ut: &mut impl ViewStorageMut<Lanes<S>, 2, Device = D>,
    ) -> Result<()> {
        require_levels(pver)?;
        let ncol = policy.league_size();
        let (nmid, nint) = (npack::<W>(pver), npack::<W>(pver + 1));
        check_extents("dpm", dpm, [ncol, nmid])?;
        check_extents("tau", tau, [ncol, common.num_waves(), nint])?;
        check_extents("ut", &*ut, [ncol, nmid])?;

        let scale = common.effgw() * S::from_f64(GRAVIT);
        policy.for_each_team(ut.slabs_mut(), |team, ut| {
            let col = team.league_rank();
            divergence(pver, nint, scale, dpm.slab(col), tau.slab(col), ut);
        })?;
        tracing::debug!(
            device = D::NAME,
            ncol,
            pver,
            "gwd_compute_tendencies_from_stress_divergence dispatched"
        );
        Ok(())
    }
}

fn divergence<S: Scalar>(
    pver: usize,
    nint: usize,
    scale: S,
    dpm: &[Lanes<S>],
    tau: &[Lanes<S>],
    ut: &mut [Lanes<S>],
) {
    let zero = Lanes::splat(S::ZERO);
    for (p, (ut_p, dp)) in ut.iter_mut().zip(dpm).enumerate() {
        let at = (p * W) as isize;
        let mut sum = zero;
        for tau_l in tau.chunks_exact(nint) {
            let t = &scalarize(tau_l)[..=pver];
            sum += Lanes::from_slice_at(t, at + 1, S::ZERO) - Lanes::from_slice_at(t, at, S::ZERO);
        }
        let valid = valid_lanes::<W>(pver, p);
        let dp = Lanes::select(valid, *dp, Lanes::splat(S::ONE));
        *ut_p = Lanes::select(valid, sum * scale / dp, zero);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_pack::pack_scalars;

    #[test]
    fn tendency_is_scaled_divergence() {
        let pver = 2;
        let nint = npack::<W>(pver + 1);
        let mut tau = pack_scalars::<f64, W>(&[0.0, 2.0, 6.0], 0.0);
        tau.extend(pack_scalars::<f64, W>(&[1.0, 1.0, 0.0], 0.0));
        let dpm = pack_scalars::<f64, W>(&[4.0, 2.0], 0.0);
        let mut ut = vec![Lanes::<f64>::default(); npack::<W>(pver)];
        divergence(pver, nint, 1.0, &dpm, &tau, &mut ut);
        let ut = scalarize(&ut);
        assert_eq!(&ut[..pver], &[0.5, 1.5]);
        assert!(ut[pver..].iter().all(|&v| v == 0.0));
    }
}
