//! Storage error types for the preference layer.
//!
//! This module defines structured error types for preference-store
//! operations, providing error context and type safety over string-based
//! errors.

use thiserror::Error;

/// Errors that can occur during preference-store operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization of the store contents failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization of the store contents failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error while reading or writing the backing file.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, StorageError::FileIo { .. })
    }

    /// Check if this error is a serialization/deserialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            StorageError::SerializationFailed { .. } | StorageError::DeserializationFailed { .. }
        )
    }
}

// Conversion from StorageError to the main Error type
impl From<StorageError> for crate::Error {
    fn from(err: StorageError) -> Self {
        crate::Error::Storage(err)
    }
}
