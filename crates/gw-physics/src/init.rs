//! Module-level initialisation.
//!
//! `gw_common_init` returns a guard instead of filling globals; everything
//! the kernels need from initialisation travels in [`GwCommon`].

use crate::{Functions, WARNING_KEYS};
use gw_common::{GwError, GwInitConfig, Real, Result, warn_once};
use gw_device::Device;
use gw_pack::Scalar;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_INITS: AtomicUsize = AtomicUsize::new(0);

/// Number of [`GwInit`] guards currently alive in the process.
pub fn live_inits() -> usize {
    LIVE_INITS.load(Ordering::SeqCst)
}

/// State produced by initialisation: the phase-speed spectrum and the
/// tendency efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct GwCommon<S: Scalar = Real> {
    pgwv: usize,
    dc: S,
    effgw: S,
    cref: Vec<S>,
}

impl<S: Scalar> GwCommon<S> {
    fn new(config: &GwInitConfig) -> Result<Self> {
        if !(config.dc.is_finite() && config.dc > 0.0) {
            return Err(GwError::InvalidArgument(format!(
                "phase-speed bin width must be positive, got {}",
                config.dc
            )));
        }
        if !(config.effgw.is_finite() && config.effgw >= 0.0) {
            return Err(GwError::InvalidArgument(format!(
                "effgw must be non-negative, got {}",
                config.effgw
            )));
        }
        let pgwv = config.pgwv;
        let cref = (0..2 * pgwv + 1)
            .map(|l| S::from_f64(config.dc * (l as f64 - pgwv as f64)))
            .collect();
        Ok(Self { pgwv, dc: S::from_f64(config.dc), effgw: S::from_f64(config.effgw), cref })
    }

    /// Phase-speed bins on each side of zero.
    pub fn pgwv(&self) -> usize {
        self.pgwv
    }

    /// Waves in the spectrum, `2 * pgwv + 1`.
    pub fn num_waves(&self) -> usize {
        self.cref.len()
    }

    pub(crate) fn cref(&self) -> &[S] {
        &self.cref
    }

    pub(crate) fn effgw(&self) -> S {
        self.effgw
    }

    #[cfg_attr(not(any(test, feature = "unit-test-access")), allow(dead_code))]
    pub(crate) fn dc(&self) -> S {
        self.dc
    }
}

/// Live initialisation. Dropping it finalises the module.
#[derive(Debug)]
#[must_use = "dropping the guard finalises the module immediately"]
pub struct GwInit<S: Scalar = Real> {
    common: GwCommon<S>,
}

impl<S: Scalar> Deref for GwInit<S> {
    type Target = GwCommon<S>;

    fn deref(&self) -> &GwCommon<S> {
        &self.common
    }
}

impl<S: Scalar> Drop for GwInit<S> {
    fn drop(&mut self) {
        let remaining = LIVE_INITS.fetch_sub(1, Ordering::SeqCst) - 1;
        if remaining == 0 {
            warn_once::forget(WARNING_KEYS);
        }
        tracing::debug!(remaining, "gw module finalised");
    }
}

impl<S: Scalar, D: Device> Functions<S, D> {
    /// Initialise the module for a test or run.
    pub fn gw_common_init(config: &GwInitConfig) -> Result<GwInit<S>> {
        let common = GwCommon::new(config)?;
        let live = LIVE_INITS.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            pgwv = common.pgwv,
            waves = common.num_waves(),
            live,
            "gw module initialised"
        );
        Ok(GwInit { common })
    }

    /// Explicitly finalise; equivalent to dropping the guard.
    pub fn gw_finalize(init: GwInit<S>) {
        drop(init);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_device::HostSerial;
    use serial_test::serial;

    type F = Functions<f64, HostSerial>;

    #[test]
    #[serial(gw_init)]
    fn spectrum_is_symmetric() {
        let init = F::gw_common_init(&GwInitConfig { pgwv: 2, dc: 2.5, effgw: 1.0 }).unwrap();
        assert_eq!(init.cref(), &[-5.0, -2.5, 0.0, 2.5, 5.0]);
        assert_eq!(init.num_waves(), 5);
        assert_eq!(init.pgwv(), 2);
    }

    #[test]
    #[serial(gw_init)]
    fn guards_are_counted() {
        let before = live_inits();
        let a = F::gw_common_init(&GwInitConfig::default()).unwrap();
        let b = F::gw_common_init(&GwInitConfig::default()).unwrap();
        assert_eq!(live_inits(), before + 2);
        drop(a);
        F::gw_finalize(b);
        assert_eq!(live_inits(), before);
    }

    #[test]
    #[serial(gw_init)]
    fn kernel_warnings_end_with_the_last_init() {
        let key = WARNING_KEYS[0];
        let outer = F::gw_common_init(&GwInitConfig::default()).unwrap();
        let inner = F::gw_common_init(&GwInitConfig::default()).unwrap();
        warn_once::warn_once_fn(key, "raised while initialised");
        drop(inner);
        assert!(warn_once::has_warned(key));
        drop(outer);
        assert!(!warn_once::has_warned(key));
    }

    #[test]
    #[serial(gw_init)]
    fn invalid_parameters_leave_no_live_init() {
        let before = live_inits();
        let err = F::gw_common_init(&GwInitConfig { pgwv: 1, dc: 0.0, effgw: 1.0 }).unwrap_err();
        assert!(matches!(err, GwError::InvalidArgument(_)));
        assert!(F::gw_common_init(&GwInitConfig { pgwv: 1, dc: 1.0, effgw: -1.0 }).is_err());
        assert_eq!(live_inits(), before);
    }
}
