//!
//! Courier Console: the client-side shell of the Courier admin console.
//! This library owns the cross-cutting state every console page shares.
//!
//! ## Core Concepts
//!
//! The shell is built around a small set of components:
//!
//! * **Preference storage (`storage::PreferenceStore`)**: A pluggable, durable
//!   key-value layer that survives restarts, namespaced per application.
//! * **Session state (`session::SessionState`)**: In-memory
//!   authenticated/insecure flags, seeded synchronously from a local
//!   key-value store and mutated by `login`/`logout`.
//! * **Settings state (`settings::SettingsState`)**: The user-settings record
//!   and its explicit bootstrap state machine (`Unloaded -> Loading -> Ready`).
//!   All mutations go through a merge-and-persist operation so the persisted
//!   record and the in-memory record never diverge.
//! * **Update signal (`update::UpdateSignal`)**: A monotonic one-shot flag set
//!   by the background update checker.
//! * **Shell (`shell::Shell`)**: The composition root. It sequences the
//!   settings bootstrap and hands out the settings/storage capability objects
//!   only once bootstrap has reached `Ready`.

pub mod constants;
pub mod session;
pub mod settings;
pub mod shell;
pub mod storage;
pub mod update;

// Re-export the main types for easier access.
pub use session::{AuthClient, SessionFlags, SessionState, store::LocalStore};
pub use settings::{BootstrapState, ColorMode, SettingsState, SettingsUpdate, UserSettings};
pub use shell::{SettingsCapability, Shell, StorageCapability};
pub use storage::PreferenceStore;
pub use update::{UpdateNotifier, UpdateSignal};

/// Result type used throughout the Courier Console library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Courier Console library.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured session/authentication errors from the session module
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured settings errors from the settings module
    #[error(transparent)]
    Settings(settings::SettingsError),

    /// Structured shell errors from the shell module
    #[error(transparent)]
    Shell(shell::ShellError),

    /// Structured storage errors from the storage module
    #[error(transparent)]
    Storage(storage::StorageError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Session(_) => "session",
            Error::Settings(_) => "settings",
            Error::Shell(_) => "shell",
            Error::Storage(_) => "storage",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates the shell or settings state machine has
    /// not reached `Ready` yet.
    pub fn is_not_ready(&self) -> bool {
        match self {
            Error::Settings(settings_err) => settings_err.is_not_ready(),
            Error::Shell(shell_err) => shell_err.is_not_ready(),
            _ => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_rejected(),
            _ => false,
        }
    }

    /// Check if this error is storage/persistence-related.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Storage(storage_err) => storage_err.is_io_error(),
            _ => false,
        }
    }
}
