//! Session error types for the authentication flow.

use thiserror::Error;

/// Errors that can occur while talking to the authentication endpoint.
///
/// These are recovered locally by [`SessionState::login`](super::SessionState::login):
/// the failure is logged and session state is left unchanged. They surface as
/// values only from [`AuthClient::authenticate`](super::AuthClient::authenticate).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// The endpoint answered with a non-2xx status.
    #[error("Authentication rejected with HTTP status {status}")]
    AuthRejected {
        /// The HTTP status code returned
        status: u16,
    },

    /// The request could not be sent or the connection failed.
    #[error("Authentication request failed: {reason}")]
    Network {
        /// Description of the transport failure
        reason: String,
    },

    /// The response body was not valid JSON or is missing the token field.
    #[error("Malformed authentication response: {reason}")]
    MalformedResponse {
        /// Description of the parse failure
        reason: String,
    },

    /// The configured server base URL cannot address the auth endpoint.
    #[error("Invalid authentication endpoint: {reason}")]
    InvalidEndpoint {
        /// Description of the URL problem
        reason: String,
    },
}

impl SessionError {
    /// Check if this error is an explicit rejection by the endpoint.
    pub fn is_rejected(&self) -> bool {
        matches!(self, SessionError::AuthRejected { .. })
    }

    /// Check if this error is a transport-level failure.
    pub fn is_network_error(&self) -> bool {
        matches!(self, SessionError::Network { .. })
    }
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
