//! Constants used throughout the Courier Console library.
//!
//! This module provides central definitions for the reserved storage keys and
//! wire-level strings shared by the session and settings components.

/// Preference-store key holding the full persisted `UserSettings` record.
pub const USER_SETTINGS_KEY: &str = "USER_SETTINGS";

/// Local-store key holding the auth token. Presence means authenticated.
pub const TOKEN_KEY: &str = "token";

/// Local-store key marking an insecure session.
pub const INSECURE_KEY: &str = "insecure";

/// Value stored under [`INSECURE_KEY`] when the session is insecure.
pub const INSECURE_FLAG_VALUE: &str = "true";

/// Sentinel token value meaning "authenticated without a real credential scheme".
pub const INSECURE_TOKEN: &str = "insecure";

/// Path of the authentication endpoint, relative to the server base URL.
pub const AUTH_PATH: &str = "admin/auth";

/// Default application identifier used to namespace persisted console state.
pub const DEFAULT_APP_NAME: &str = "courier";
