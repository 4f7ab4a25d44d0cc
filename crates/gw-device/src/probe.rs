//! Host capability probing.
//!
//! The pack width is fixed at build time; the probe reports what the host
//! could natively use so the harness can flag a mismatch.

use std::fmt;

/// SIMD tier of the host CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdLevel {
    /// No SIMD; scalar fallback only.
    Scalar,
    /// ARM NEON (128-bit).
    Neon,
    /// x86 SSE4.2 (128-bit).
    Sse42,
    /// x86 AVX2 (256-bit).
    Avx2,
    /// x86 AVX-512 (512-bit).
    Avx512,
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdLevel::Scalar => write!(f, "scalar"),
            SimdLevel::Neon => write!(f, "neon"),
            SimdLevel::Sse42 => write!(f, "sse4.2"),
            SimdLevel::Avx2 => write!(f, "avx2"),
            SimdLevel::Avx512 => write!(f, "avx512"),
        }
    }
}

impl SimdLevel {
    /// Vector register width in bytes; `None` for scalar.
    pub const fn register_bytes(self) -> Option<usize> {
        match self {
            SimdLevel::Scalar => None,
            SimdLevel::Neon | SimdLevel::Sse42 => Some(16),
            SimdLevel::Avx2 => Some(32),
            SimdLevel::Avx512 => Some(64),
        }
    }

    /// Lanes of `S` one register holds (at least 1).
    pub const fn lanes_for<S>(self) -> usize {
        match self.register_bytes() {
            Some(bytes) if bytes > std::mem::size_of::<S>() => bytes / std::mem::size_of::<S>(),
            _ => 1,
        }
    }
}

/// Detect the best SIMD tier available at runtime.
pub fn detect_simd_level() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512f") {
            SimdLevel::Avx512
        } else if is_x86_feature_detected!("avx2") {
            SimdLevel::Avx2
        } else if is_x86_feature_detected!("sse4.2") {
            SimdLevel::Sse42
        } else {
            SimdLevel::Scalar
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        SimdLevel::Neon
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        SimdLevel::Scalar
    }
}

/// Host CPU capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuCapabilities {
    /// Logical cores available to the process (always >= 1).
    pub core_count: usize,
    pub simd_level: SimdLevel,
}

pub fn probe_cpu() -> CpuCapabilities {
    let core_count =
        std::thread::available_parallelism().map(std::num::NonZero::get).unwrap_or(1);
    CpuCapabilities { core_count, simd_level: detect_simd_level() }
}

/// Pack width the host would natively use for `S`.
pub fn native_pack_width<S>() -> usize {
    detect_simd_level().lanes_for::<S>()
}
