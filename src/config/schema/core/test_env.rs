use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serializes env-var mutation across tests and restores every touched
/// variable when dropped.
pub(crate) struct EnvScope {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvScope {
    pub(crate) fn lock() -> Self {
        Self {
            _lock: ENV_LOCK
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
            saved: Vec::new(),
        }
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(saved, _)| *saved == key) {
            self.saved.push((key, std::env::var(key).ok()));
        }
    }

    pub(crate) fn set(&mut self, key: &'static str, value: &str) {
        self.remember(key);
        // SAFETY: Test-only helper. ENV_LOCK is held for the lifetime of
        // this scope, serializing env access between tests.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    pub(crate) fn unset(&mut self, key: &'static str) {
        self.remember(key);
        // SAFETY: Test-only helper, see `set`.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            // SAFETY: The lock field is dropped after this body runs, so no
            // other test mutates the environment concurrently.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
