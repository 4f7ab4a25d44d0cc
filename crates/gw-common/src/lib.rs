//! Common types and utilities for the gravity-wave kernel workspace
//!
//! This crate provides the foundational pieces every other crate builds on:
//! scalar selection (`Real`), the build-time pack width, the error taxonomy,
//! configuration loading and logging setup.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod warn_once;

pub use config::{
    GwConfig, GwConfigBuilder, GwInitConfig, LogFormat, LoggingConfig, TestingConfig,
};
pub use error::{ConfigError, GwError, Result};
pub use logging::init_logging;
pub use types::{Real, SMALL_PACK_SIZE};
pub use warn_once::warn_once_fn;
