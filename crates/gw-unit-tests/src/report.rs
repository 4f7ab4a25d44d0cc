//! Run reports for `run_declared`.

use crate::registry::{CaseResult, UnitTestCase, run_case_with};
use crate::{HarnessError, MAX_PACK_SIZE, NUM_TEST_ITRS};
use gw_common::{GwConfig, SMALL_PACK_SIZE};
use gw_device::Device;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub device: String,
    pub pack_size: usize,
    pub max_pack_size: usize,
    pub num_test_itrs: usize,
    pub cases: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_owned(),
            pack_size: SMALL_PACK_SIZE,
            max_pack_size: MAX_PACK_SIZE,
            num_test_itrs: NUM_TEST_ITRS,
            cases: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &str, result: &CaseResult, elapsed: Duration) {
        let error = result.as_ref().err().map(|e| format!("{e:#}"));
        self.cases.push(CaseOutcome {
            name: name.to_owned(),
            passed: error.is_none(),
            error,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
    }

    /// Run `C` on `D` and record the outcome.
    pub fn run<D: Device, C: UnitTestCase<D>>(&mut self, config: &GwConfig) {
        let start = Instant::now();
        let result = run_case_with::<D, C>(config);
        if let Err(e) = &result {
            tracing::error!(case = C::NAME, device = D::NAME, "{e:#}");
        }
        self.record(C::NAME, &result, start.elapsed());
    }

    pub fn passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|c| !c.passed)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), HarnessError> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|source| HarnessError::Report { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), cases = self.cases.len(), "run report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_listed_with_their_cause() {
        let mut report = RunReport::new("HostSerial");
        report.record("ok", &Ok(()), Duration::from_millis(3));
        report.record("bad", &Err(anyhow::anyhow!("ni[2] off")), Duration::ZERO);
        assert!(!report.passed());
        let failed: Vec<_> = report.failures().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, ["bad"]);
        assert_eq!(report.cases[1].error.as_deref(), Some("ni[2] off"));
    }

    #[test]
    fn json_omits_absent_errors() {
        let mut report = RunReport::new("HostThreads");
        report.record("ok", &Ok(()), Duration::from_millis(1));
        let json = report.to_json().unwrap();
        assert!(!json.contains("\"error\""));
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
