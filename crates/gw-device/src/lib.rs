//! Device abstraction for pack-aware kernels
//!
//! A [`Device`] pairs an [`ExecutionSpace`] (how dispatched work runs) with a
//! [`MemorySpace`] (where view storage lives). Three devices are provided:
//!
//! - [`HostSerial`]: host memory, one thread
//! - [`HostThreads`]: host memory, rayon thread pool
//! - [`Accelerator`]: emulated device memory with its own pool; views are
//!   reached from the host through mirrors
//!
//! [`DefaultDevice`] is `HostThreads` unless the `default-serial` or
//! `default-accelerator` feature is enabled.

pub mod device;
pub mod memory;
pub mod mirror;
pub mod policy;
pub mod probe;
pub mod space;
pub mod types;
pub mod view;

pub use device::{Accelerator, DefaultDevice, Device, HostSerial, HostThreads, device_names};
pub use memory::{DeviceSpace, HostAccessible, HostSpace, MemorySpace};
pub use mirror::{HostMirror, create_mirror, create_mirror_and_copy, deep_copy};
pub use policy::{RangePolicy, TeamMember, TeamPolicy};
pub use probe::{CpuCapabilities, SimdLevel, detect_simd_level, native_pack_width, probe_cpu};
pub use space::{ExecutionSpace, Serial, Simt, Threads};
pub use types::{
    DeviceTypes, ExeSpace, MemberType, TypeBridge, Uview1d, Uview2d, Uview3d, View1d, View2d,
    View3d,
};
pub use view::{Unmanaged, View, ViewStorage, ViewStorageMut};
