//! File-backed preference store implementation.
//!
//! Persists the full item map to `<data_dir>/<name>.json` on every write, so
//! preferences survive restarts without an explicit snapshot step. The file
//! name is derived from the application identifier, giving each application
//! its own namespace within a shared data directory.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

use async_trait::async_trait;
use serde_json::Value;

use super::{
    PreferenceStore,
    errors::StorageError,
    in_memory::{PERSISTENCE_VERSION, PersistedContents},
};
use crate::Result;

/// A durable preference store writing through to a JSON file.
///
/// Reads are served from memory; every `set` rewrites the backing file with
/// the full map before returning, so a successful `set` implies the record is
/// on disk. Last-write-wins; concurrent writers to the same file are not
/// coordinated.
#[derive(Debug)]
pub struct JsonFile {
    /// Application identifier namespacing this instance
    name: String,
    /// Path of the backing file
    path: PathBuf,
    /// In-memory view of the file contents
    items: RwLock<HashMap<String, Value>>,
}

impl JsonFile {
    /// Opens (or creates) the store for `name` under `data_dir`.
    ///
    /// Loads existing contents from `<data_dir>/<name>.json` when present;
    /// a missing file yields an empty store and is created on first write.
    pub async fn open<P: AsRef<Path>>(data_dir: P, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let path = data_dir.as_ref().join(format!("{name}.json"));
        let items = match tokio::fs::read_to_string(&path).await {
            Ok(json) => {
                let contents: PersistedContents = serde_json::from_str(&json)
                    .map_err(|e| StorageError::DeserializationFailed { source: e })?;
                contents.items
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::FileIo { source: e }.into()),
        };
        Ok(Self {
            name,
            path,
            items: RwLock::new(items),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, items: HashMap<String, Value>) -> Result<()> {
        let contents = PersistedContents {
            version: PERSISTENCE_VERSION,
            items,
        };
        let json = serde_json::to_string_pretty(&contents)
            .map_err(|e| StorageError::SerializationFailed { source: e })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StorageError::FileIo { source: e }.into())
    }
}

#[async_trait]
impl PreferenceStore for JsonFile {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let items = self.items.read().unwrap();
        Ok(items.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        // Write the file first; the in-memory view only advances once the
        // record is durable.
        let updated = {
            let items = self.items.read().unwrap();
            let mut updated = items.clone();
            updated.insert(key.to_string(), value);
            updated
        };
        self.flush(updated.clone()).await?;
        *self.items.write().unwrap() = updated;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
