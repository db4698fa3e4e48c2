//! Settings error types for the bootstrap state machine.

use thiserror::Error;

use super::BootstrapState;

/// Errors that can occur during settings operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings were accessed before the bootstrap reached `Ready`.
    #[error("User settings are not ready (bootstrap state: {state:?})")]
    NotReady {
        /// The state the machine was in at the time
        state: BootstrapState,
    },

    /// `bootstrap` was invoked while a load was already in flight.
    #[error("User settings bootstrap is already in progress")]
    BootstrapInProgress,
}

impl SettingsError {
    /// Check if this error indicates the state machine has not reached `Ready`.
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            SettingsError::NotReady { .. } | SettingsError::BootstrapInProgress
        )
    }
}

// Conversion from SettingsError to the main Error type
impl From<SettingsError> for crate::Error {
    fn from(err: SettingsError) -> Self {
        crate::Error::Settings(err)
    }
}
