//! Scoped changes to the `GW_*` environment for tests.
//!
//! Prefer `temp_env::with_vars` with `#[serial(gw_env)]`. [`EnvScope`] is
//! for setups that need several steps between setting variables and
//! reading them; it restores every variable it touched when dropped, and
//! holds a process-wide lock while alive. Tests using it still need
//! `#[serial(gw_env)]` against other test binaries running in parallel.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|e| e.into_inner())
}

/// Every variable the harness reads.
pub const GW_VARS: &[&str] = &[
    gw_common::config::CONFIG_PATH_ENV,
    "GW_TEST_SEED",
    "GW_TEST_TOLERANCE",
    "GW_TEST_COLUMNS",
    "GW_TEST_REPORT",
    "GW_LOG",
    "GW_LOG_FORMAT",
];

#[derive(Debug)]
pub struct EnvScope {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub fn new() -> Self {
        Self { saved: Vec::new(), _lock: env_lock() }
    }

    /// A scope in which none of [`GW_VARS`] is set.
    pub fn clean() -> Self {
        let mut scope = Self::new();
        for var in GW_VARS {
            scope.remove(var);
        }
        scope
    }

    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.save(key);
        // SAFETY: callers hold ENV_LOCK and are serialised with
        // `#[serial(gw_env)]`, so no other thread reads the environment.
        unsafe { env::set_var(key, value) };
        self
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.save(key);
        // SAFETY: as in `set`.
        unsafe { env::remove_var(key) };
        self
    }

    fn save(&mut self, key: &str) {
        if !self.saved.iter().any(|(k, _)| k == key) {
            self.saved.push((key.to_owned(), env::var(key).ok()));
        }
    }
}

impl Default for EnvScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            // SAFETY: the lock is still held until `_lock` drops.
            unsafe {
                match value {
                    Some(v) => env::set_var(&key, v),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}
