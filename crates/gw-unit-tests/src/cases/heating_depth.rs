use super::TestGwHeatingDepth;
use crate::compare::{assert_close, assert_indices};
use crate::data::{Profiles, from_view1d, to_packed_view};
use crate::{Base, CaseResult, UnitTest, UnitTestCase, reference};
use anyhow::{Context, ensure};
use gw_common::Real;
use gw_device::{Device, View1d};
use gw_physics::Functions;

/// Heating above this height is ignored.
const MAXH: Real = 2.0e4;

impl<D: Device> UnitTestCase<D> for TestGwHeatingDepth<D> {
    const NAME: &'static str = "gw_heating_depth";

    fn run(base: &Base<D>) -> CaseResult {
        let mut rng = base.rng(Self::NAME);
        let ncol = base.columns();
        let tol = base.tolerance();

        for pver in UnitTest::<D>::pack_boundary_lengths() {
            let mut p = Profiles::generate(&mut rng, ncol, pver);
            // The last column is cooling everywhere.
            if let Some(cooling) = p.netdt.last_mut() {
                cooling.iter_mut().for_each(|q| *q = -q.abs() - 1.0e-6);
            }
            let zm = to_packed_view::<D>("zm", &p.zm)?;
            let netdt = to_packed_view::<D>("netdt", &p.netdt)?;

            let mut maxi = View1d::<usize, D>::new("maxi", [ncol]);
            let mut mini = View1d::<usize, D>::new("mini", [ncol]);
            let mut hdepth = View1d::<Real, D>::new("hdepth", [ncol]);
            let mut maxq0 = View1d::<Real, D>::new("maxq0", [ncol]);
            Functions::<Real, D>::gw_heating_depth(
                &base.team_policy(ncol, pver),
                pver,
                MAXH,
                &zm,
                &netdt,
                &mut maxi,
                &mut mini,
                &mut hdepth,
                &mut maxq0,
            )
            .with_context(|| format!("gw_heating_depth with pver = {pver}"))?;

            let expected: Vec<_> = (0..ncol)
                .map(|c| reference::gw_heating_depth(pver, MAXH, &p.zm[c], &p.netdt[c]))
                .collect();
            let field = |name: &str| format!("pver {pver} {name}");
            assert_indices(
                &field("maxi"),
                &expected.iter().map(|h| h.maxi).collect::<Vec<_>>(),
                &from_view1d(&maxi),
            )?;
            assert_indices(
                &field("mini"),
                &expected.iter().map(|h| h.mini).collect::<Vec<_>>(),
                &from_view1d(&mini),
            )?;
            assert_close(
                &field("hdepth"),
                &expected.iter().map(|h| h.hdepth).collect::<Vec<_>>(),
                &from_view1d(&hdepth),
                tol,
            )?;
            assert_close(
                &field("maxq0"),
                &expected.iter().map(|h| h.maxq0).collect::<Vec<_>>(),
                &from_view1d(&maxq0),
                tol,
            )?;

            let last = &expected[ncol - 1];
            ensure!(
                (last.maxi, last.mini) == (pver, pver),
                "cooling column reported heating between {} and {}",
                last.maxi,
                last.mini
            );
        }
        Ok(())
    }
}
