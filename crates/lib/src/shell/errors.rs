//! Shell error types for the composition root.

use thiserror::Error;

use crate::settings::BootstrapState;

/// Errors that can occur at the shell level.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShellError {
    /// A capability was requested before the settings bootstrap reached
    /// `Ready`.
    #[error("Shell is not ready (bootstrap state: {state:?}); run bootstrap first")]
    NotReady {
        /// The bootstrap state at the time of the request
        state: BootstrapState,
    },
}

impl ShellError {
    /// Check if this error indicates the shell has not finished bootstrapping.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, ShellError::NotReady { .. })
    }
}

// Conversion from ShellError to the main Error type
impl From<ShellError> for crate::Error {
    fn from(err: ShellError) -> Self {
        crate::Error::Shell(err)
    }
}
