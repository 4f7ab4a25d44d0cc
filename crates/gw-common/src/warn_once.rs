//! Once-per-key warnings.
//!
//! Kernels and the harness report recoverable oddities (a clamped source
//! level, a pack width that disagrees with the host's native SIMD width) on
//! every call. Only the first report for a key is emitted at WARN; repeats
//! drop to DEBUG. Owners of scoped state release their keys with [`forget`]
//! when that state is torn down.
//!
//! ```
//! use gw_common::warn_once;
//!
//! for level in [3, 3, 3] {
//!     warn_once!("src_level_clamped", "source level {level} clamped to pver");
//! }
//! ```

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, OnceLock};

static SEEN: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

fn seen() -> MutexGuard<'static, HashSet<String>> {
    SEEN.get_or_init(|| Mutex::new(HashSet::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Emit `message` at WARN the first time `key` is seen, DEBUG afterwards.
///
/// Returns `true` when this call produced the WARN-level event.
pub fn warn_once_fn(key: &str, message: &str) -> bool {
    let first = seen().insert(key.to_owned());
    if first {
        tracing::warn!(key, "{message}");
    } else {
        tracing::debug!(key, "(repeated) {message}");
    }
    first
}

/// Whether a warning has already been emitted for `key`.
pub fn has_warned(key: &str) -> bool {
    seen().contains(key)
}

/// Forget `keys`, so the next report for each is a first report again.
pub fn forget(keys: &[&str]) {
    let mut seen = seen();
    for key in keys {
        seen.remove(*key);
    }
}

/// Formatting front end for [`warn_once_fn`].
#[macro_export]
macro_rules! warn_once {
    ($key:expr, $($arg:tt)*) => {
        $crate::warn_once::warn_once_fn($key, &format!($($arg)*))
    };
}
