//! Internal access for the unit-test harness.
//!
//! Compiled only with the `unit-test-access` feature. Everything here takes
//! a [`UnitTestAccess`] token so call sites that reach past the public API
//! are easy to find.

use crate::GwCommon;
use gw_common::{GwError, Result};
use gw_pack::Scalar;

/// Capability token for kernel internals.
#[derive(Debug)]
pub struct UnitTestAccess {
    _private: (),
}

impl UnitTestAccess {
    pub fn grant() -> Self {
        tracing::trace!("unit-test access granted");
        Self { _private: () }
    }
}

/// Read-only view of the state `gw_common_init` produced.
#[derive(Debug, Clone, Copy)]
pub struct GwCommonInternals<'a, S: Scalar> {
    common: &'a GwCommon<S>,
}

impl<S: Scalar> GwCommon<S> {
    pub fn internals<'a>(&'a self, _access: &UnitTestAccess) -> GwCommonInternals<'a, S> {
        GwCommonInternals { common: self }
    }
}

impl<'a, S: Scalar> GwCommonInternals<'a, S> {
    /// Phase speed of each wave, `dc * (l - pgwv)`.
    pub fn cref(&self) -> &'a [S] {
        self.common.cref()
    }

    pub fn pgwv(&self) -> usize {
        self.common.pgwv()
    }

    pub fn dc(&self) -> S {
        self.common.dc()
    }

    pub fn effgw(&self) -> S {
        self.common.effgw()
    }

    /// The spectrum as a device table.
    #[cfg(gw_exposes = "view_1d_table")]
    pub fn cref_table<D: gw_device::Device>(&self) -> crate::CrefTable<S, D> {
        use gw_device::ViewStorageMut;
        let cref = self.cref();
        let mut table = crate::CrefTable::<S, D>::new("cref", [cref.len()]);
        table.span_mut().copy_from_slice(cref);
        table
    }
}

/// Interface temperature as `gw_prof` computes it.
///
/// Fails with [`GwError::InvalidArgument`] when `pver` is zero, `k` lies
/// below the surface interface, or a profile is shorter than the column.
pub fn interface_temperature<S: Scalar>(
    _access: &UnitTestAccess,
    pver: usize,
    t: &[S],
    pmid: &[S],
    pint: &[S],
    k: usize,
) -> Result<S> {
    crate::kernels::require_levels(pver)?;
    if k > pver || t.len() < pver || pmid.len() < pver || pint.len() <= pver {
        return Err(GwError::InvalidArgument(format!(
            "interface {k} of a {pver}-level column (t: {}, pmid: {}, pint: {} values)",
            t.len(),
            pmid.len(),
            pint.len()
        )));
    }
    Ok(crate::kernels::interface_temperature(pver, t, pmid, pint, k))
}

/// Critical-level test used by `gwd_compute_stress_profiles`.
pub fn critical_level<S: Scalar>(_access: &UnitTestAccess, c: S, u: S, source_diff: S) -> bool {
    crate::kernels::critical_level(c, u, source_diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Functions;
    use gw_common::GwInitConfig;
    use gw_device::{HostSerial, ViewStorage};
    use serial_test::serial;

    #[test]
    #[serial(gw_init)]
    fn internals_mirror_initialisation() {
        let access = UnitTestAccess::grant();
        let init = Functions::<f64, HostSerial>::gw_common_init(&GwInitConfig {
            pgwv: 1,
            dc: 4.0,
            effgw: 0.5,
        })
        .unwrap();
        let internals = init.internals(&access);
        assert_eq!(internals.cref(), &[-4.0, 0.0, 4.0]);
        assert_eq!((internals.pgwv(), internals.dc(), internals.effgw()), (1, 4.0, 0.5));
        let table = internals.cref_table::<HostSerial>();
        assert_eq!(table.span(), internals.cref());
    }

    #[test]
    fn interface_temperature_rejects_degenerate_columns() {
        let access = UnitTestAccess::grant();
        let (t, pmid, pint) = ([250.0, 260.0], [100.0, 300.0], [0.0, 200.0, 400.0]);
        assert_eq!(interface_temperature(&access, 2, &t, &pmid, &pint, 2).unwrap(), 260.0);

        let empty: [f64; 0] = [];
        let err = interface_temperature(&access, 0, &empty, &empty, &[0.0], 0).unwrap_err();
        assert!(matches!(err, GwError::InvalidArgument(_)));
        assert!(interface_temperature(&access, 2, &t, &pmid, &pint, 3).is_err());
        assert!(interface_temperature(&access, 3, &t, &pmid, &pint, 1).is_err());
    }
}
