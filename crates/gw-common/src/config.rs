//! Configuration types and utilities
//!
//! Configuration is layered: built-in defaults, then an optional TOML file
//! named by `GW_CONFIG`, then individual `GW_*` environment overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable naming a TOML configuration file.
pub const CONFIG_PATH_ENV: &str = "GW_CONFIG";

/// Main configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GwConfig {
    pub testing: TestingConfig,
    pub physics: GwInitConfig,
    pub logging: LoggingConfig,
}

/// Settings consumed by the unit-test harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingConfig {
    /// Base seed for per-case random number generators.
    pub seed: u64,
    /// Relative tolerance for non-bit-for-bit comparisons.
    pub tolerance: f64,
    /// Number of columns (league size) each case dispatches over.
    pub columns: usize,
    /// Where to write the JSON run report, if anywhere.
    pub report_path: Option<PathBuf>,
}

impl Default for TestingConfig {
    fn default() -> Self {
        Self {
            seed: 1_618_033,
            tolerance: if cfg!(feature = "single-precision") { 1e-5 } else { 1e-12 },
            columns: 3,
            report_path: None,
        }
    }
}

/// Parameters for the one-time gravity-wave module initialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GwInitConfig {
    /// Number of phase-speed bins on each side of zero.
    pub pgwv: usize,
    /// Phase-speed bin width (m/s).
    pub dc: f64,
    /// Tendency efficiency factor.
    pub effgw: f64,
}

impl Default for GwInitConfig {
    fn default() -> Self {
        Self { pgwv: 4, dc: 2.5, effgw: 1.0 }
    }
}

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::Compact }
    }
}

/// Supported log output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

impl GwConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the file named by `GW_CONFIG`, then `GW_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        base.with_env_overrides()
    }

    /// Apply `GW_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(seed) = parse_env("GW_TEST_SEED")? {
            self.testing.seed = seed;
        }
        if let Some(tolerance) = parse_env("GW_TEST_TOLERANCE")? {
            self.testing.tolerance = tolerance;
        }
        if let Some(columns) = parse_env("GW_TEST_COLUMNS")? {
            self.testing.columns = columns;
        }
        if let Some(path) = env::var_os("GW_TEST_REPORT") {
            self.testing.report_path = Some(PathBuf::from(path));
        }
        if let Ok(level) = env::var("GW_LOG") {
            self.logging.level = level;
        }
        if let Some(format) = parse_env::<LogFormat>("GW_LOG_FORMAT")? {
            self.logging.format = format;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.testing.tolerance.is_finite() && self.testing.tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "testing.tolerance must be a positive finite number, got {}",
                self.testing.tolerance
            )));
        }
        if self.testing.columns == 0 {
            return Err(ConfigError::Invalid("testing.columns must be at least 1".into()));
        }
        if !(self.physics.dc.is_finite() && self.physics.dc > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "physics.dc must be positive, got {}",
                self.physics.dc
            )));
        }
        if !(self.physics.effgw.is_finite() && self.physics.effgw >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "physics.effgw must be non-negative, got {}",
                self.physics.effgw
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        Ok(())
    }

    pub fn builder() -> GwConfigBuilder {
        GwConfigBuilder::default()
    }
}

fn parse_env<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var: var.to_string(), value }),
        Err(_) => Ok(None),
    }
}

/// Builder for [`GwConfig`]
#[derive(Debug, Default)]
pub struct GwConfigBuilder {
    config: GwConfig,
}

impl GwConfigBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.testing.seed = seed;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.testing.tolerance = tolerance;
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.config.testing.columns = columns;
        self
    }

    pub fn report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.testing.report_path = Some(path.into());
        self
    }

    pub fn pgwv(mut self, pgwv: usize) -> Self {
        self.config.physics.pgwv = pgwv;
        self
    }

    pub fn dc(mut self, dc: f64) -> Self {
        self.config.physics.dc = dc;
        self
    }

    pub fn effgw(mut self, effgw: f64) -> Self {
        self.config.physics.effgw = effgw;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    pub fn build(self) -> Result<GwConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
