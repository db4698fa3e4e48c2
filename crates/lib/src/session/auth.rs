//! HTTP client for the authentication endpoint.
//!
//! Speaks the endpoint's contract: `POST {prefix}admin/auth` with a
//! form-encoded `password` field and `Accept: application/json`, answered by
//! a JSON body carrying a `token` field.

use reqwest::header::ACCEPT;
use serde::Deserialize;
use url::Url;

use super::errors::SessionError;
use crate::constants::AUTH_PATH;

/// Success response body of the authentication endpoint.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

/// Client for the admin authentication endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base: Url,
}

impl AuthClient {
    /// Creates a client for the server at `base`.
    ///
    /// The auth endpoint is resolved as `{base}admin/auth`, so a base of
    /// `http://host:8000/` posts to `http://host:8000/admin/auth`.
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Submits `password` and returns the granted token.
    ///
    /// A non-2xx status, transport failure, or unparseable body is a typed
    /// [`SessionError`]; no distinction is made between them by callers that
    /// only care whether authentication succeeded.
    pub async fn authenticate(&self, password: &str) -> std::result::Result<String, SessionError> {
        let endpoint = self
            .base
            .join(AUTH_PATH)
            .map_err(|e| SessionError::InvalidEndpoint {
                reason: e.to_string(),
            })?;

        let response = self
            .http
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .form(&[("password", password)])
            .send()
            .await
            .map_err(|e| SessionError::Network {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SessionError::AuthRejected {
                status: response.status().as_u16(),
            });
        }

        let body: AuthResponse =
            response
                .json()
                .await
                .map_err(|e| SessionError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        Ok(body.token)
    }
}
