use super::{W, check_extents, require_levels};
use crate::consts::SECONDS_PER_DAY;
use crate::{Functions, Lanes};
use gw_common::Result;
use gw_device::{Device, TeamPolicy, ViewStorage, ViewStorageMut};
use gw_pack::{Scalar, npack, scalarize, valid_lanes};

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeatingRange<S> {
    top: usize,
    bottom: usize,
    depth: S,
    max_rate: S,
}

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Vertical extent and strength of the heating region of each column.
    ///
    /// The region is every level below `maxh` with positive `netdt`. `maxi`
    /// and `mini` receive its top and bottom level indices (both `pver` when
    /// the column does not heat), `hdepth` the height difference between
    /// them and `maxq0` the peak heating rate per day.
    #[allow(clippy::too_many_arguments)]
    pub fn gw_heating_depth(
        policy: &TeamPolicy<D>,
        pver: usize,
        maxh: S,
        zm: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        netdt: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        maxi: &mut impl ViewStorageMut<usize, 1, Device = D>,
        mini: &mut impl ViewStorageMut<usize, 1, Device = D>,
        hdepth: &mut impl ViewStorageMut<S, 1, Device = D>,
        maxq0: &mut impl ViewStorageMut<S, 1, Device = D>,
    ) -> Result<()> {
        require_levels(pver)?;
        let ncol = policy.league_size();
        let nmid = npack::<W>(pver);
        check_extents("zm", zm, [ncol, nmid])?;
        check_extents("netdt", netdt, [ncol, nmid])?;
        check_extents("maxi", &*maxi, [ncol])?;
        check_extents("mini", &*mini, [ncol])?;
        check_extents("hdepth", &*hdepth, [ncol])?;
        check_extents("maxq0", &*maxq0, [ncol])?;

        let items: Vec<_> = maxi
            .span_mut()
            .iter_mut()
            .zip(mini.span_mut().iter_mut())
            .zip(hdepth.span_mut().iter_mut())
            .zip(maxq0.span_mut().iter_mut())
            .collect();
        policy.for_each_team(items, |team, (((top, bottom), depth), rate)| {
            let col = team.league_rank();
            let range = heating_range(pver, maxh, zm.slab(col), netdt.slab(col));
            *top = range.top;
            *bottom = range.bottom;
            *depth = range.depth;
            *rate = range.max_rate;
        })?;
        tracing::debug!(device = D::NAME, ncol, pver, "gw_heating_depth dispatched");
        Ok(())
    }
}

fn heating_range<S: Scalar>(
    pver: usize,
    maxh: S,
    zm: &[Lanes<S>],
    netdt: &[Lanes<S>],
) -> HeatingRange<S> {
    let mut top = None;
    let mut bottom = None;
    let mut peak = S::ZERO;
    for (p, (z, q)) in zm.iter().zip(netdt).enumerate() {
        let heating = valid_lanes::<W>(pver, p) & z.lt(maxh) & q.gt(S::ZERO);
        if heating.none() {
            continue;
        }
        if top.is_none() {
            top = heating.first_set().map(|l| p * W + l);
        }
        bottom = heating.last_set().map(|l| p * W + l);
        peak = peak.max(q.masked_reduce_max(heating, S::ZERO));
    }

    match (top, bottom) {
        (Some(top), Some(bottom)) => {
            let z = scalarize(zm);
            HeatingRange {
                top,
                bottom,
                depth: z[top] - z[bottom],
                max_rate: peak * S::from_f64(SECONDS_PER_DAY),
            }
        }
        _ => HeatingRange { top: pver, bottom: pver, depth: S::ZERO, max_rate: S::ZERO },
    }
}
