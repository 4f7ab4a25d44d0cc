use super::{W, check_extents, require_levels};
use crate::{Functions, GwCommon, Lanes};
use gw_common::{Result, warn_once};
use gw_device::{Device, TeamPolicy, ViewStorage, ViewStorageMut};
use gw_pack::{Scalar, npack, scalarize, scalarize_mut};

pub(crate) const SRC_LEVEL_WARNING: &str = "gwd_compute_stress_profiles.src_level";

/// Whether a wave of phase speed `c` is absorbed where the wind is `u`:
/// the intrinsic speed vanishes or its sign differs from `source_diff`,
/// the intrinsic speed at the source.
pub(crate) fn critical_level<S: Scalar>(c: S, u: S, source_diff: S) -> bool {
    let diff = c - u;
    diff == S::ZERO || (diff > S::ZERO) != (source_diff > S::ZERO)
}

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Propagate the source stress of every wave upward from `src_level`.
    ///
    /// `tau` is `[ncol, num_waves, npack(pver + 1)]`; the value at each
    /// column's source level is the input and everything above it is
    /// overwritten. Levels below the source are left untouched.
    pub fn gwd_compute_stress_profiles(
        policy: &TeamPolicy<D>,
        common: &GwCommon<S>,
        pver: usize,
        src_level: &impl ViewStorage<usize, 1, Device = D>,
        ubi: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        tau: &mut impl ViewStorageMut<Lanes<S>, 3, Device = D>,
    ) -> Result<()> {
        require_levels(pver)?;
        let ncol = policy.league_size();
        let nint = npack::<W>(pver + 1);
        check_extents("src_level", src_level, [ncol])?;
        check_extents("ubi", ubi, [ncol, nint])?;
        check_extents("tau", &*tau, [ncol, common.num_waves(), nint])?;

        let cref = common.cref();
        policy.for_each_team(tau.slabs_mut(), |team, tau| {
            let col = team.league_rank();
            let mut src = src_level.span()[col];
            if src > pver {
                warn_once!(
                    SRC_LEVEL_WARNING,
                    "source level {src} is below the surface interface {pver}; clamping"
                );
                src = pver;
            }
            let u = &scalarize(ubi.slab(col))[..=pver];
            for (tau_l, &c) in tau.chunks_exact_mut(nint).zip(cref) {
                propagate(&mut scalarize_mut(tau_l)[..=pver], u, c, src);
            }
        })?;
        tracing::debug!(
            device = D::NAME,
            ncol,
            pver,
            waves = common.num_waves(),
            "gwd_compute_stress_profiles dispatched"
        );
        Ok(())
    }
}

fn propagate<S: Scalar>(tau: &mut [S], u: &[S], c: S, src: usize) {
    let source_diff = c - u[src];
    let mut absorbed = source_diff == S::ZERO;
    if absorbed {
        tau[src] = S::ZERO;
    }
    for k in (0..src).rev() {
        absorbed = absorbed || critical_level(c, u[k], source_diff);
        tau[k] = if absorbed { S::ZERO } else { tau[k + 1] };
    }
}
