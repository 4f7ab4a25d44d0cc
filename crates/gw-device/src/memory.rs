//! Memory spaces

use std::fmt;

/// Where a view's storage lives.
pub trait MemorySpace: Copy + Default + fmt::Debug + Send + Sync + 'static {
    const NAME: &'static str;
    /// Whether host code may dereference views in this space directly.
    const HOST_ACCESSIBLE: bool;
}

/// Marker for memory spaces whose views support host element access.
pub trait HostAccessible: MemorySpace {}

/// Ordinary host memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSpace;

/// Accelerator-resident memory; reach it from the host through a mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceSpace;

impl MemorySpace for HostSpace {
    const NAME: &'static str = "HostSpace";
    const HOST_ACCESSIBLE: bool = true;
}

impl HostAccessible for HostSpace {}

impl MemorySpace for DeviceSpace {
    const NAME: &'static str = "DeviceSpace";
    const HOST_ACCESSIBLE: bool = false;
}
