//! Straight-line scalar versions of the kernels, one column at a time.
//!
//! Each follows the documented formula level by level with no packing, so a
//! pack-boundary or masking bug in a kernel shows up as a mismatch here.

use gw_common::Real;
use gw_physics::consts::{GRAVIT, N2MIN, RAIR, SECONDS_PER_DAY};

#[derive(Debug, Clone, PartialEq)]
pub struct Prof {
    pub ti: Vec<Real>,
    pub rhoi: Vec<Real>,
    pub ni: Vec<Real>,
    pub nm: Vec<Real>,
}

pub fn gw_prof(pver: usize, cpair: Real, t: &[Real], pmid: &[Real], pint: &[Real]) -> Prof {
    let g2 = (GRAVIT * GRAVIT) as Real;
    let rair = RAIR as Real;

    let mut ti = Vec::with_capacity(pver + 1);
    ti.push(t[0]);
    for k in 1..pver {
        let w = (pint[k] - pmid[k - 1]) / (pmid[k] - pmid[k - 1]);
        ti.push(t[k - 1] + (t[k] - t[k - 1]) * w);
    }
    ti.push(t[pver - 1]);

    let rhoi: Vec<Real> = (0..=pver).map(|k| pint[k] / (ti[k] * rair)).collect();
    let ni: Vec<Real> = (0..=pver)
        .map(|k| {
            if k == 0 || k == pver {
                (g2 / (ti[k] * cpair)).sqrt()
            } else {
                let dtdp = (t[k] - t[k - 1]) / (pmid[k] - pmid[k - 1]);
                let n2 = g2 / ti[k] * (1.0 / cpair - rhoi[k] * dtdp);
                n2.max(N2MIN as Real).sqrt()
            }
        })
        .collect();
    let nm = ni.windows(2).map(|w| (w[0] + w[1]) * 0.5).collect();
    Prof { ti, rhoi, ni, nm }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatingDepth {
    pub maxi: usize,
    pub mini: usize,
    pub hdepth: Real,
    pub maxq0: Real,
}

pub fn gw_heating_depth(pver: usize, maxh: Real, zm: &[Real], netdt: &[Real]) -> HeatingDepth {
    let heating: Vec<usize> = (0..pver).filter(|&k| zm[k] < maxh && netdt[k] > 0.0).collect();
    match (heating.first(), heating.last()) {
        (Some(&maxi), Some(&mini)) => {
            let peak = heating.iter().map(|&k| netdt[k]).fold(0.0, Real::max);
            HeatingDepth {
                maxi,
                mini,
                hdepth: zm[maxi] - zm[mini],
                maxq0: peak * SECONDS_PER_DAY as Real,
            }
        }
        _ => HeatingDepth { maxi: pver, mini: pver, hdepth: 0.0, maxq0: 0.0 },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormSpeed {
    pub us: Real,
    pub umin: Real,
    pub umax: Real,
}

pub fn gw_storm_speed(
    pver: usize,
    storm_speed_min: Real,
    storm_level: usize,
    ubm: &[Real],
    maxi: usize,
    mini: usize,
) -> StormSpeed {
    let mut us = ubm[storm_level].trunc();
    if us.abs() < storm_speed_min {
        us = if us < 0.0 { -storm_speed_min } else { storm_speed_min };
    }
    let band = if maxi <= mini && mini < pver {
        &ubm[maxi..=mini]
    } else {
        &ubm[storm_level..=storm_level]
    };
    let umin = band.iter().copied().fold(us, Real::min);
    let umax = band.iter().copied().fold(us, Real::max);
    StormSpeed { us, umin, umax }
}

/// `tau[l]` holds wave `l` on `pver + 1` interfaces; the source-level value
/// is read, everything above it rewritten.
pub fn gwd_compute_stress_profiles(
    pver: usize,
    cref: &[Real],
    src_level: usize,
    ubi: &[Real],
    tau: &mut [Vec<Real>],
) {
    let src = src_level.min(pver);
    for (tau, &c) in tau.iter_mut().zip(cref) {
        let at_source = c - ubi[src];
        let mut absorbed = at_source == 0.0;
        if absorbed {
            tau[src] = 0.0;
        }
        for k in (0..src).rev() {
            let here = c - ubi[k];
            absorbed = absorbed || here == 0.0 || (here > 0.0) != (at_source > 0.0);
            tau[k] = if absorbed { 0.0 } else { tau[k + 1] };
        }
    }
}

pub fn gwd_compute_tendencies_from_stress_divergence(
    pver: usize,
    effgw: Real,
    dpm: &[Real],
    tau: &[Vec<Real>],
) -> Vec<Real> {
    let scale = effgw * GRAVIT as Real;
    (0..pver)
        .map(|k| {
            let mut div: Real = 0.0;
            for tau in tau {
                div += tau[k + 1] - tau[k];
            }
            div * scale / dpm[k]
        })
        .collect()
}
