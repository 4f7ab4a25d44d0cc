use gw_common::GwError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the harness itself.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("{field}[{index}]: expected {expected:e}, got {actual:e} (tolerance {tolerance:e})")]
    Mismatch { field: String, index: usize, expected: f64, actual: f64, tolerance: f64 },

    #[error("{field}[{index}]: expected index {expected}, got {actual}")]
    IndexMismatch { field: String, index: usize, expected: usize, actual: usize },

    #[error("{field}: expected {expected} values, got {actual}")]
    LengthMismatch { field: String, expected: usize, actual: usize },

    #[error("kernel rejected its arguments: {0}")]
    Kernel(#[from] GwError),

    #[error("failed to write run report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialise run report: {0}")]
    Serialize(#[from] serde_json::Error),
}
