use super::TestGwStormSpeed;
use crate::compare::assert_bfb;
use crate::data::{Profiles, from_view1d, to_packed_view, to_view1d};
use crate::{Base, CaseResult, UnitTest, UnitTestCase, reference};
use anyhow::{Context, ensure};
use gw_common::{GwError, Real};
use gw_device::{Device, View1d};
use gw_physics::Functions;

const STORM_SPEED_MIN: Real = 5.0;
const MAXH: Real = 2.0e4;

impl<D: Device> UnitTestCase<D> for TestGwStormSpeed<D> {
    const NAME: &'static str = "gw_storm_speed";

    fn run(base: &Base<D>) -> CaseResult {
        let mut rng = base.rng(Self::NAME);
        let ncol = base.columns();

        for pver in UnitTest::<D>::pack_boundary_lengths() {
            let p = Profiles::generate(&mut rng, ncol, pver);
            let storm_level = pver / 2;
            let heating: Vec<_> = (0..ncol)
                .map(|c| reference::gw_heating_depth(pver, MAXH, &p.zm[c], &p.netdt[c]))
                .collect();

            let ubm = to_packed_view::<D>("ubm", &p.ubm)?;
            let maxi = to_view1d::<usize, D>("maxi", heating.iter().map(|h| h.maxi).collect())?;
            let mini = to_view1d::<usize, D>("mini", heating.iter().map(|h| h.mini).collect())?;
            let mut us = View1d::<Real, D>::new("us", [ncol]);
            let mut umin = View1d::<Real, D>::new("umin", [ncol]);
            let mut umax = View1d::<Real, D>::new("umax", [ncol]);
            let policy = base.team_policy(ncol, pver);
            Functions::<Real, D>::gw_storm_speed(
                &policy,
                pver,
                STORM_SPEED_MIN,
                storm_level,
                &ubm,
                &maxi,
                &mini,
                &mut us,
                &mut umin,
                &mut umax,
            )
            .with_context(|| format!("gw_storm_speed with pver = {pver}"))?;

            let expected: Vec<_> = (0..ncol)
                .map(|c| {
                    let h = &heating[c];
                    reference::gw_storm_speed(pver, STORM_SPEED_MIN, storm_level, &p.ubm[c], h.maxi, h.mini)
                })
                .collect();
            let field = |name: &str| format!("pver {pver} {name}");
            assert_bfb(&field("us"), &expected.iter().map(|s| s.us).collect::<Vec<_>>(), &from_view1d(&us))?;
            assert_bfb(
                &field("umin"),
                &expected.iter().map(|s| s.umin).collect::<Vec<_>>(),
                &from_view1d(&umin),
            )?;
            assert_bfb(
                &field("umax"),
                &expected.iter().map(|s| s.umax).collect::<Vec<_>>(),
                &from_view1d(&umax),
            )?;
            for s in &expected {
                ensure!(s.us.abs() >= STORM_SPEED_MIN, "storm speed {} below the minimum", s.us);
                ensure!(s.umin <= s.us && s.us <= s.umax, "storm speed {} outside [{}, {}]", s.us, s.umin, s.umax);
            }

            let rejected = Functions::<Real, D>::gw_storm_speed(
                &policy,
                pver,
                STORM_SPEED_MIN,
                pver,
                &ubm,
                &maxi,
                &mini,
                &mut us,
                &mut umin,
                &mut umax,
            );
            ensure!(
                matches!(rejected, Err(GwError::InvalidArgument(_))),
                "storm level at pver = {pver} was accepted"
            );
        }
        Ok(())
    }
}
