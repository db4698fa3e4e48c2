//! Local key-value storage for session flags.
//!
//! This is the non-durable counterpart to the preference store: a synchronous
//! string-to-string map holding the `token` and `insecure` keys. Reads and
//! writes never suspend and never fail from the caller's perspective, which
//! keeps session construction and logout synchronous.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

/// Synchronous local key-value store for session flags.
///
/// Implementations must be `Send` and `Sync` so the handle can be shared.
/// Operations are infallible; a file-backed implementation that cannot flush
/// logs the failure and carries on with its in-memory view.
pub trait LocalStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Succeeds even if the key is absent.
    fn remove(&self, key: &str);
}

/// In-memory [`LocalStore`], for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryLocal {
    items: RwLock<HashMap<String, String>>,
}

impl InMemoryLocal {
    /// Creates a new, empty local store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for InMemoryLocal {
    fn get(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap();
        items.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut items = self.items.write().unwrap();
        items.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut items = self.items.write().unwrap();
        items.remove(key);
    }
}

/// File-backed [`LocalStore`] so session flags survive process restarts.
///
/// The whole map is rewritten on every mutation. Flush failures are logged
/// and otherwise ignored: the trait contract is infallible, and a session
/// flag that fails to persist only means the user logs in again next run.
#[derive(Debug)]
pub struct JsonFileLocal {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
}

impl JsonFileLocal {
    /// Opens (or creates) the local store backed by `path`.
    ///
    /// Unreadable or malformed contents are discarded with a warning; the
    /// store starts empty in that case.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let items = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding malformed session store");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read session store");
                HashMap::new()
            }
        };
        Self {
            path,
            items: RwLock::new(items),
        }
    }

    fn flush(&self, items: &HashMap<String, String>) {
        match serde_json::to_string_pretty(items) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to write session store");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize session store");
            }
        }
    }
}

impl LocalStore for JsonFileLocal {
    fn get(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap();
        items.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut items = self.items.write().unwrap();
        items.insert(key.to_string(), value.to_string());
        self.flush(&items);
    }

    fn remove(&self, key: &str) {
        let mut items = self.items.write().unwrap();
        items.remove(key);
        self.flush(&items);
    }
}
