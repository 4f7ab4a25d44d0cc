//! The declared unit-test cases.
//!
//! Each case runs its kernel at every level count in
//! [`UnitTest::pack_boundary_lengths`](crate::UnitTest::pack_boundary_lengths)
//! and compares the result with the matching [`reference`](crate::reference)
//! function, column by column.

mod gw_prof;
mod heating_depth;
mod storm_speed;
mod stress_divergence;
mod stress_profiles;

crate::declare_test_cases! {
    /// Interface profiles: temperature, density and buoyancy frequency.
    TestGwProf,
    /// Depth and peak rate of the heating layer.
    TestGwHeatingDepth,
    /// Storm speed and the wind range across the heating layer.
    TestGwStormSpeed,
    /// Upward propagation of source stress with critical-level absorption.
    TestGwdComputeStressProfiles,
    /// Wind tendencies from the vertical divergence of stress.
    TestGwdComputeTendenciesFromStressDivergence,
}
