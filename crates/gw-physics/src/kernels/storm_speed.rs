use super::{W, check_extents, require_levels};
use crate::{Functions, Lanes};
use gw_common::{GwError, Result, warn_once};
use gw_device::{Device, TeamPolicy, ViewStorage, ViewStorageMut};
use gw_pack::{Mask, Scalar, npack, scalarize, valid_lanes};

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Storm speed and the wind range over the heating region.
    ///
    /// `us` is the wind at `storm_level`, truncated toward zero and raised
    /// in magnitude to at least `storm_speed_min`. `umin`/`umax` span the
    /// midpoint wind between `maxi` and `mini` (inclusive) and always
    /// contain `us`.
    #[allow(clippy::too_many_arguments)]
    pub fn gw_storm_speed(
        policy: &TeamPolicy<D>,
        pver: usize,
        storm_speed_min: S,
        storm_level: usize,
        ubm: &impl ViewStorage<Lanes<S>, 2, Device = D>,
        maxi: &impl ViewStorage<usize, 1, Device = D>,
        mini: &impl ViewStorage<usize, 1, Device = D>,
        us: &mut impl ViewStorageMut<S, 1, Device = D>,
        umin: &mut impl ViewStorageMut<S, 1, Device = D>,
        umax: &mut impl ViewStorageMut<S, 1, Device = D>,
    ) -> Result<()> {
        require_levels(pver)?;
        if storm_level >= pver {
            return Err(GwError::InvalidArgument(format!(
                "storm_level {storm_level} must be below pver {pver}"
            )));
        }
        if !(storm_speed_min.is_finite() && storm_speed_min >= S::ZERO) {
            return Err(GwError::InvalidArgument(format!(
                "storm_speed_min must be non-negative, got {storm_speed_min}"
            )));
        }
        let ncol = policy.league_size();
        check_extents("ubm", ubm, [ncol, npack::<W>(pver)])?;
        check_extents("maxi", maxi, [ncol])?;
        check_extents("mini", mini, [ncol])?;
        check_extents("us", &*us, [ncol])?;
        check_extents("umin", &*umin, [ncol])?;
        check_extents("umax", &*umax, [ncol])?;

        let items: Vec<_> = us
            .span_mut()
            .iter_mut()
            .zip(umin.span_mut().iter_mut())
            .zip(umax.span_mut().iter_mut())
            .collect();
        policy.for_each_team(items, |team, ((us, umin), umax)| {
            let col = team.league_rank();
            let storm = StormColumn { pver, storm_level, ubm: ubm.slab(col) };
            let heating = (maxi.span()[col], mini.span()[col]);
            (*us, *umin, *umax) = storm.speeds(storm_speed_min, heating);
        })?;
        tracing::debug!(device = D::NAME, ncol, pver, storm_level, "gw_storm_speed dispatched");
        Ok(())
    }
}

pub(crate) const HEATING_RANGE_WARNING: &str = "gw_storm_speed.heating_range";

struct StormColumn<'a, S: Scalar> {
    pver: usize,
    storm_level: usize,
    ubm: &'a [Lanes<S>],
}

impl<S: Scalar> StormColumn<'_, S> {
    fn speeds(&self, speed_min: S, (top, bottom): (usize, usize)) -> (S, S, S) {
        let u = scalarize(self.ubm)[self.storm_level];
        let mut speed = u.trunc();
        if speed.abs() < speed_min {
            speed = if speed < S::ZERO { -speed_min } else { speed_min };
        }

        let (lo, hi) = if top <= bottom && bottom < self.pver {
            self.band_extremes(top, bottom)
        } else {
            if (top, bottom) != (self.pver, self.pver) {
                warn_once!(
                    HEATING_RANGE_WARNING,
                    "heating range {top}..={bottom} outside 0..{}; using the storm-level wind",
                    self.pver
                );
            }
            (u, u)
        };
        (speed, lo.min(speed), hi.max(speed))
    }

    fn band_extremes(&self, top: usize, bottom: usize) -> (S, S) {
        self.ubm.iter().enumerate().fold((S::MAX, S::MIN), |(lo, hi), (p, pack)| {
            let band = valid_lanes::<W>(self.pver, p)
                & Mask::from_fn(|l| (top..=bottom).contains(&(p * W + l)));
            (
                lo.min(pack.masked_reduce_min(band, S::MAX)),
                hi.max(pack.masked_reduce_max(band, S::MIN)),
            )
        })
    }
}
