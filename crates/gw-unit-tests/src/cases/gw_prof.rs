use super::TestGwProf;
use crate::compare::assert_close;
use crate::data::{Profiles, from_packed_view, to_packed_view};
use crate::{Base, CaseResult, Spack, UnitTest, UnitTestCase, reference};
use anyhow::Context;
use gw_common::{Real, SMALL_PACK_SIZE};
use gw_device::{Device, View2d};
use gw_pack::npack;
use gw_physics::consts::CPAIR;
use gw_physics::{Functions, testing};

impl<D: Device> UnitTestCase<D> for TestGwProf<D> {
    const NAME: &'static str = "gw_prof";

    fn run(base: &Base<D>) -> CaseResult {
        let mut rng = base.rng(Self::NAME);
        let ncol = base.columns();
        let tol = base.tolerance();
        let cpair = CPAIR as Real;

        for pver in UnitTest::<D>::pack_boundary_lengths() {
            let p = Profiles::generate(&mut rng, ncol, pver);
            let t = to_packed_view::<D>("t", &p.t)?;
            let pmid = to_packed_view::<D>("pmid", &p.pmid)?;
            let pint = to_packed_view::<D>("pint", &p.pint)?;

            let nint = npack::<SMALL_PACK_SIZE>(pver + 1);
            let mut rhoi = View2d::<Spack, D>::new("rhoi", [ncol, nint]);
            let mut ni = View2d::<Spack, D>::new("ni", [ncol, nint]);
            let mut nm = View2d::<Spack, D>::new("nm", [ncol, npack::<SMALL_PACK_SIZE>(pver)]);
            Functions::<Real, D>::gw_prof(
                &base.team_policy(ncol, pver),
                pver,
                cpair,
                &t,
                &pmid,
                &pint,
                &mut rhoi,
                &mut ni,
                &mut nm,
            )
            .with_context(|| format!("gw_prof with pver = {pver}"))?;

            let rhoi = from_packed_view(&rhoi, pver + 1);
            let ni = from_packed_view(&ni, pver + 1);
            let nm = from_packed_view(&nm, pver);
            for c in 0..ncol {
                let expected = reference::gw_prof(pver, cpair, &p.t[c], &p.pmid[c], &p.pint[c]);
                let ti: Vec<Real> = (0..=pver)
                    .map(|k| {
                        testing::interface_temperature(
                            base.access(),
                            pver,
                            &p.t[c],
                            &p.pmid[c],
                            &p.pint[c],
                            k,
                        )
                    })
                    .collect::<gw_common::Result<_>>()?;
                assert_close(&format!("col {c} pver {pver} ti"), &expected.ti, &ti, tol)?;
                assert_close(&format!("col {c} pver {pver} rhoi"), &expected.rhoi, &rhoi[c], tol)?;
                assert_close(&format!("col {c} pver {pver} ni"), &expected.ni, &ni[c], tol)?;
                assert_close(&format!("col {c} pver {pver} nm"), &expected.nm, &nm[c], tol)?;
            }
        }
        Ok(())
    }
}
