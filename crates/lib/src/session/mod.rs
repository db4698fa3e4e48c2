//! Session state for the admin console shell.
//!
//! Tracks the authenticated/insecure flags, mirrors them into a local
//! key-value store, and drives the login/logout operations against the
//! authentication endpoint. Unlike user settings there is no asynchronous
//! rehydration: the initial flags are derived synchronously from the local
//! store at construction.

use std::sync::{Arc, RwLock};

use crate::constants::{INSECURE_FLAG_VALUE, INSECURE_KEY, INSECURE_TOKEN, TOKEN_KEY};

pub mod auth;
pub mod errors;
pub mod store;

pub use auth::AuthClient;
pub use errors::SessionError;
pub use store::{InMemoryLocal, JsonFileLocal, LocalStore};

/// The in-memory session flags.
///
/// Invariants: `insecure` implies `authenticated` (an insecure session is
/// still a session), and `authenticated == false` implies both local-store
/// keys are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionFlags {
    /// Whether a session exists (a token is stored).
    pub authenticated: bool,
    /// Whether the session uses the insecure sentinel token.
    pub insecure: bool,
}

/// Derives the initial session flags from the local store.
///
/// Presence of the `token` key means authenticated; the `insecure` key set to
/// `"true"` marks an insecure session. Read once at construction; there is no
/// ambient-global fallback.
pub fn load_initial_session(store: &dyn LocalStore) -> SessionFlags {
    SessionFlags {
        authenticated: store.get(TOKEN_KEY).is_some(),
        insecure: store.get(INSECURE_KEY).as_deref() == Some(INSECURE_FLAG_VALUE),
    }
}

/// Session state: flags plus the stores and client that maintain them.
pub struct SessionState {
    local: Arc<dyn LocalStore>,
    auth: AuthClient,
    flags: RwLock<SessionFlags>,
}

impl SessionState {
    /// Creates the session state, seeding flags synchronously from `local`.
    pub fn new(local: Arc<dyn LocalStore>, auth: AuthClient) -> Self {
        let flags = load_initial_session(local.as_ref());
        Self {
            local,
            auth,
            flags: RwLock::new(flags),
        }
    }

    /// Returns a copy of the current session flags.
    pub fn flags(&self) -> SessionFlags {
        *self.flags.read().unwrap()
    }

    /// Submits `password` to the authentication endpoint.
    ///
    /// On success the token lands in the local store, `authenticated` is
    /// raised, and `insecure` is raised too when the token equals the
    /// `"insecure"` sentinel. On any failure (rejection, transport, parse)
    /// the failure is logged and session state and storage are left
    /// untouched; no error value reaches the caller.
    ///
    /// Returns whether the session is authenticated afterwards.
    pub async fn login(&self, password: &str) -> bool {
        match self.auth.authenticate(password).await {
            Ok(token) => {
                self.local.set(TOKEN_KEY, &token);
                let insecure = token == INSECURE_TOKEN;
                if insecure {
                    self.local.set(INSECURE_KEY, INSECURE_FLAG_VALUE);
                }
                let mut flags = self.flags.write().unwrap();
                flags.authenticated = true;
                flags.insecure = insecure;
                tracing::debug!(insecure, "Login succeeded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed; session unchanged");
                false
            }
        }
    }

    /// Ends the session: removes both local-store keys and resets both flags.
    ///
    /// Synchronous, makes no network call, and is idempotent; logging out of
    /// an already logged-out session observably changes nothing.
    pub fn logout(&self) {
        self.local.remove(TOKEN_KEY);
        self.local.remove(INSECURE_KEY);
        let mut flags = self.flags.write().unwrap();
        *flags = SessionFlags::default();
    }
}
