//! In-memory preference store implementation.
//!
//! Suitable for testing, development, or scenarios where durability is
//! handled externally by saving/loading the whole state to/from a file.

use std::{
    collections::HashMap,
    path::Path,
    sync::RwLock,
};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{PreferenceStore, errors::StorageError};
use crate::{Result, constants::DEFAULT_APP_NAME};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
pub(crate) const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable envelope for persisted store contents.
#[derive(Serialize, Deserialize)]
pub(crate) struct PersistedContents {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    pub(crate) version: u8,
    pub(crate) items: HashMap<String, Value>,
}

/// A simple in-memory preference store backed by a `HashMap`.
///
/// Provides basic snapshot persistence via [`save_to_file`](InMemory::save_to_file)
/// and [`load_from_file`](InMemory::load_from_file), serializing the map to
/// JSON. Unlike [`JsonFile`](super::JsonFile), writes are not durable on their
/// own; the caller decides when to snapshot.
#[derive(Debug)]
pub struct InMemory {
    /// Application identifier namespacing this instance
    name: String,
    /// Stored items with a read-write lock for concurrent access
    items: RwLock<HashMap<String, Value>>,
}

impl InMemory {
    /// Creates a new, empty `InMemory` store for the default application.
    pub fn new() -> Self {
        Self::named(DEFAULT_APP_NAME)
    }

    /// Creates a new, empty `InMemory` store for the given application name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the keys currently stored.
    pub fn keys(&self) -> Vec<String> {
        let items = self.items.read().unwrap();
        items.keys().cloned().collect()
    }

    /// Saves the entire store state to a file as JSON.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let items = self.items.read().unwrap().clone();
        let contents = PersistedContents {
            version: PERSISTENCE_VERSION,
            items,
        };
        let json = serde_json::to_string_pretty(&contents)
            .map_err(|e| StorageError::SerializationFailed { source: e })?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| StorageError::FileIo { source: e }.into())
    }

    /// Loads store state from a JSON file.
    ///
    /// If the file does not exist, a new, empty store is returned.
    pub async fn load_from_file<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => {
                let contents: PersistedContents = serde_json::from_str(&json)
                    .map_err(|e| StorageError::DeserializationFailed { source: e })?;
                Ok(Self {
                    name: name.into(),
                    items: RwLock::new(contents.items),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::named(name)),
            Err(e) => Err(StorageError::FileIo { source: e }.into()),
        }
    }
}

impl Default for InMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for InMemory {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let items = self.items.read().unwrap();
        Ok(items.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut items = self.items.write().unwrap();
        items.insert(key.to_string(), value);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
