//! Which kernel-module types unit tests may name.
//!
//! Generated at build time from `kernel_types.toml`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityStatus {
    /// Exposed and usable.
    Supported,
    /// Listed but not yet exposed; naming it is a build error.
    Pending,
}

impl fmt::Display for CapabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityStatus::Supported => write!(f, "supported"),
            CapabilityStatus::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCapability {
    pub name: &'static str,
    pub status: CapabilityStatus,
    pub description: &'static str,
}

include!(concat!(env!("OUT_DIR"), "/type_capabilities.rs"));

/// Look up a type by the name it is exposed under.
pub fn type_capability(name: &str) -> Option<&'static TypeCapability> {
    TYPE_CAPABILITIES.iter().find(|c| c.name == name)
}

pub fn supported_types() -> impl Iterator<Item = &'static TypeCapability> {
    TYPE_CAPABILITIES.iter().filter(|c| c.status == CapabilityStatus::Supported)
}

pub fn pending_types() -> impl Iterator<Item = &'static TypeCapability> {
    TYPE_CAPABILITIES.iter().filter(|c| c.status == CapabilityStatus::Pending)
}

/// One-line summary for logs: `supported=[..] pending=[..]`.
pub fn capability_summary() -> String {
    fn names(it: impl Iterator<Item = &'static TypeCapability>) -> String {
        it.map(|c| c.name).collect::<Vec<_>>().join(",")
    }
    format!("supported=[{}] pending=[{}]", names(supported_types()), names(pending_types()))
}
