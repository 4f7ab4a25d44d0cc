//! The per-case fixture.

use crate::{Spack, UnitTest};
use anyhow::Context;
use gw_common::warn_once::forget;
use gw_common::{GwConfig, Real, init_logging, warn_once};
use gw_device::{DefaultDevice, Device, native_pack_width};
use gw_physics::capabilities::capability_summary;
use gw_physics::{Functions, GwCommon, GwInit};
use std::ops::Deref;

const PACK_WIDTH_WARNING: &str = "unit_tests.pack_width";

/// Owns the kernel module's initialisation for the lifetime of one case.
///
/// Dropping the fixture finalises the module; this happens on every exit
/// path of a case, including panics. Derefs to the [`UnitTest`] environment.
#[derive(Debug)]
pub struct Base<D: Device = DefaultDevice> {
    init: GwInit<Real>,
    env: UnitTest<D>,
}

impl<D: Device> Base<D> {
    /// Fixture configured from `GW_CONFIG` and the `GW_*` overrides.
    pub fn new() -> anyhow::Result<Self> {
        let config = GwConfig::from_env().context("resolving unit-test configuration")?;
        Self::with_config(&config)
    }

    pub fn with_config(config: &GwConfig) -> anyhow::Result<Self> {
        config.validate().context("validating unit-test configuration")?;
        init_logging(&config.logging);

        let env = UnitTest::new(config.testing.clone());
        tracing::debug!(
            device = D::NAME,
            fingerprint = %UnitTest::<D>::fingerprint(),
            capabilities = %capability_summary(),
            "unit-test scope"
        );
        let native = native_pack_width::<Real>();
        if native != Spack::N {
            warn_once!(
                PACK_WIDTH_WARNING,
                "pack width {} differs from the host's native width {native}",
                Spack::N
            );
        }

        let init = Functions::<Real, D>::gw_common_init(&config.physics)
            .context("initialising the gravity-wave module")?;
        Ok(Self { init, env })
    }

    /// State produced by the module initialisation.
    pub fn common(&self) -> &GwCommon<Real> {
        &self.init
    }
}

impl<D: Device> Deref for Base<D> {
    type Target = UnitTest<D>;

    fn deref(&self) -> &UnitTest<D> {
        &self.env
    }
}

impl<D: Device> Drop for Base<D> {
    fn drop(&mut self) {
        forget(&[PACK_WIDTH_WARNING]);
        tracing::trace!(device = D::NAME, "fixture torn down");
    }
}
