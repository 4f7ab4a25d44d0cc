//! Devices: an execution space paired with a memory space

use crate::memory::{DeviceSpace, HostSpace, MemorySpace};
use crate::space::{ExecutionSpace, Serial, Simt, Threads};
use std::fmt;

/// Compile-time execution target.
pub trait Device: Copy + Default + fmt::Debug + Send + Sync + 'static {
    type ExeSpace: ExecutionSpace;
    type MemorySpace: MemorySpace;
    /// Host-accessible device used for mirrors of this device's views.
    type HostMirror: Device<MemorySpace = HostSpace>;

    const NAME: &'static str;
}

/// Host memory, one thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSerial;

/// Host memory, thread pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostThreads;

/// Emulated accelerator. Its views are not host-accessible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accelerator;

impl Device for HostSerial {
    type ExeSpace = Serial;
    type MemorySpace = HostSpace;
    type HostMirror = HostSerial;
    const NAME: &'static str = "HostSerial";
}

impl Device for HostThreads {
    type ExeSpace = Threads;
    type MemorySpace = HostSpace;
    type HostMirror = HostThreads;
    const NAME: &'static str = "HostThreads";
}

impl Device for Accelerator {
    type ExeSpace = Simt;
    type MemorySpace = DeviceSpace;
    type HostMirror = HostThreads;
    const NAME: &'static str = "Accelerator";
}

/// Device used when none is named.
#[cfg(feature = "default-accelerator")]
pub type DefaultDevice = Accelerator;

/// Device used when none is named.
#[cfg(all(feature = "default-serial", not(feature = "default-accelerator")))]
pub type DefaultDevice = HostSerial;

/// Device used when none is named.
#[cfg(not(any(feature = "default-serial", feature = "default-accelerator")))]
pub type DefaultDevice = HostThreads;

/// Names of the compiled devices, `DefaultDevice` first.
pub fn device_names() -> [&'static str; 3] {
    let mut names = [HostSerial::NAME, HostThreads::NAME, Accelerator::NAME];
    if let Some(pos) = names.iter().position(|n| *n == DefaultDevice::NAME) {
        names[..=pos].rotate_right(1);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_are_host_devices() {
        type Mirror = <Accelerator as Device>::HostMirror;
        assert!(<<Mirror as Device>::MemorySpace as MemorySpace>::HOST_ACCESSIBLE);
        assert!(!<<Accelerator as Device>::MemorySpace as MemorySpace>::HOST_ACCESSIBLE);
        assert_eq!(<<HostSerial as Device>::HostMirror as Device>::NAME, "HostSerial");
    }

    #[test]
    fn default_device_listed_first() {
        let names = device_names();
        assert_eq!(names[0], DefaultDevice::NAME);
        let mut sorted = names;
        sorted.sort_unstable();
        assert_eq!(sorted, ["Accelerator", "HostSerial", "HostThreads"]);
    }
}
