use super::TestGwdComputeStressProfiles;
use crate::compare::{assert_bfb, assert_close};
use crate::data::{Profiles, from_packed_view3d, to_packed_view, to_packed_view3d, to_view1d};
use crate::{Base, CaseResult, UnitTest, UnitTestCase, reference};
use anyhow::{Context, ensure};
use gw_common::Real;
use gw_device::Device;
use gw_physics::{Functions, testing};
use rand::Rng;

impl<D: Device> UnitTestCase<D> for TestGwdComputeStressProfiles<D> {
    const NAME: &'static str = "gwd_compute_stress_profiles";

    fn run(base: &Base<D>) -> CaseResult {
        let mut rng = base.rng(Self::NAME);
        let ncol = base.columns();
        let internals = base.common().internals(base.access());
        let cref = internals.cref();

        let spectrum: Vec<Real> = (0..cref.len())
            .map(|l| internals.dc() * (l as Real - internals.pgwv() as Real))
            .collect();
        assert_close("cref", &spectrum, cref, base.tolerance())?;

        for pver in UnitTest::<D>::pack_boundary_lengths() {
            let p = Profiles::generate(&mut rng, ncol, pver);
            // Column 0 asks for a source below the surface and is clamped.
            let src: Vec<usize> =
                (0..ncol).map(|c| if c == 0 { pver + 1 } else { rng.random_range(0..=pver) }).collect();
            let input: Vec<Vec<Vec<Real>>> = (0..ncol)
                .map(|_| {
                    cref.iter()
                        .map(|_| (0..=pver).map(|_| rng.random_range(1.0e-3..0.1)).collect())
                        .collect()
                })
                .collect();

            let src_level = to_view1d::<usize, D>("src_level", src.clone())?;
            let ubi = to_packed_view::<D>("ubi", &p.ubi)?;
            let mut tau = to_packed_view3d::<D>("tau", &input)?;
            Functions::<Real, D>::gwd_compute_stress_profiles(
                &base.team_policy(ncol, pver + 1),
                base.common(),
                pver,
                &src_level,
                &ubi,
                &mut tau,
            )
            .with_context(|| format!("gwd_compute_stress_profiles with pver = {pver}"))?;
            let tau = from_packed_view3d(&tau, pver + 1);

            for c in 0..ncol {
                let mut expected = input[c].clone();
                reference::gwd_compute_stress_profiles(pver, cref, src[c], &p.ubi[c], &mut expected);
                for (l, (expected, actual)) in expected.iter().zip(&tau[c]).enumerate() {
                    assert_bfb(&format!("col {c} pver {pver} tau[{l}]"), expected, actual)?;
                }

                let s = src[c].min(pver);
                if s == 0 {
                    continue;
                }
                for (l, &speed) in cref.iter().enumerate() {
                    let source_diff = speed - p.ubi[c][s];
                    let absorbed = source_diff == 0.0
                        || testing::critical_level(base.access(), speed, p.ubi[c][s - 1], source_diff);
                    ensure!(
                        absorbed == (tau[c][l][s - 1] == 0.0),
                        "wave {l} in column {c}: absorption above level {s} is {absorbed}, \
                         stress is {}",
                        tau[c][l][s - 1]
                    );
                }
            }
        }
        Ok(())
    }
}
