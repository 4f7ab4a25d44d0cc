use super::TestGwdComputeTendenciesFromStressDivergence;
use crate::compare::assert_close;
use crate::data::{Profiles, from_packed_view, to_packed_view, to_packed_view3d};
use crate::{Base, CaseResult, Spack, UnitTest, UnitTestCase, reference};
use anyhow::Context;
use gw_common::{Real, SMALL_PACK_SIZE};
use gw_device::{Device, View2d};
use gw_pack::npack;
use gw_physics::Functions;
use rand::Rng;

impl<D: Device> UnitTestCase<D> for TestGwdComputeTendenciesFromStressDivergence<D> {
    const NAME: &'static str = "gwd_compute_tendencies_from_stress_divergence";

    fn run(base: &Base<D>) -> CaseResult {
        let mut rng = base.rng(Self::NAME);
        let ncol = base.columns();
        let tol = base.tolerance();
        let effgw = base.common().internals(base.access()).effgw();
        let nwaves = base.common().num_waves();

        for pver in UnitTest::<D>::pack_boundary_lengths() {
            let p = Profiles::generate(&mut rng, ncol, pver);
            let input: Vec<Vec<Vec<Real>>> = (0..ncol)
                .map(|_| {
                    (0..nwaves)
                        .map(|_| (0..=pver).map(|_| rng.random_range(-0.05..0.05)).collect())
                        .collect()
                })
                .collect();

            let dpm = to_packed_view::<D>("dpm", &p.dpm)?;
            let tau = to_packed_view3d::<D>("tau", &input)?;
            let mut ut = View2d::<Spack, D>::new("ut", [ncol, npack::<SMALL_PACK_SIZE>(pver)]);
            Functions::<Real, D>::gwd_compute_tendencies_from_stress_divergence(
                &base.team_policy(ncol, pver),
                base.common(),
                pver,
                &dpm,
                &tau,
                &mut ut,
            )
            .with_context(|| format!("stress divergence with pver = {pver}"))?;

            let ut = from_packed_view(&ut, pver);
            for c in 0..ncol {
                let expected = reference::gwd_compute_tendencies_from_stress_divergence(
                    pver,
                    effgw,
                    &p.dpm[c],
                    &input[c],
                );
                assert_close(&format!("col {c} pver {pver} ut"), &expected, &ut[c], tol)?;
            }
        }
        Ok(())
    }
}
