//! Durable preference storage for the Courier Console shell.
//!
//! This module provides the core [`PreferenceStore`] trait and its
//! implementations. The trait defines the interface the shell uses to persist
//! small JSON records (currently just the user-settings record) across
//! restarts, keeping the shell logic independent of the storage mechanism.
//!
//! Each store is a named instance: the application identifier isolates its
//! namespace so that multiple applications sharing a data directory do not
//! collide. The contract is last-write-wins key-value storage with no
//! transactional guarantees; the shell never issues concurrent writes to the
//! same key.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

pub mod errors;
mod in_memory;
mod json_file;

pub use errors::StorageError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;

/// Preference store trait abstracting the durable key-value layer.
///
/// Implementations must be `Send` and `Sync` so the store handle can be
/// shared across the component tree behind an `Arc`.
///
/// Values are raw JSON; the trait object additionally offers the typed
/// `get_item`/`set_item` helpers.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Retrieves the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// The application identifier namespacing this store instance.
    fn name(&self) -> &str;
}

impl dyn PreferenceStore {
    /// Typed read: deserializes the stored JSON value into `T`.
    ///
    /// Returns `None` when the key is absent. A stored value that does not
    /// deserialize into `T` is a serialization error, not "absent".
    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Typed write: serializes `value` to JSON and stores it under `key`.
    pub async fn set_item<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?).await
    }
}
