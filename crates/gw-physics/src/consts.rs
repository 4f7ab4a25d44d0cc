//! Physical constants

/// Gravitational acceleration (m/s^2).
pub const GRAVIT: f64 = 9.80616;

/// Dry-air gas constant (J/kg/K).
pub const RAIR: f64 = 287.042_311_365;

/// Dry-air specific heat at constant pressure (J/kg/K).
pub const CPAIR: f64 = 1004.64;

/// Floor on the squared buoyancy frequency (1/s^2).
pub const N2MIN: f64 = 1.0e-8;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
