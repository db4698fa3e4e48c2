//! Tests for login/logout against a loopback auth endpoint.

use std::sync::Arc;

use courier_console::{
    AuthClient, SessionFlags, SessionState,
    constants::{INSECURE_KEY, TOKEN_KEY},
    session::store::{InMemoryLocal, LocalStore},
};

use super::helpers::{
    memory_shell_with, refused_url, spawn_auth_server, spawn_plaintext_auth_server,
};

#[tokio::test]
async fn test_login_success_stores_token() {
    let (base, _shutdown) = spawn_auth_server("secret", "abc123").await;
    let (shell, _prefs, local) = memory_shell_with(base);

    assert!(shell.login("secret").await);

    let flags = shell.session_flags();
    assert!(flags.authenticated);
    assert!(!flags.insecure);
    assert_eq!(local.get(TOKEN_KEY), Some("abc123".to_string()));
    assert_eq!(local.get(INSECURE_KEY), None);
}

#[tokio::test]
async fn test_login_insecure_sentinel_marks_session() {
    let (base, _shutdown) = spawn_auth_server("secret", "insecure").await;
    let (shell, _prefs, local) = memory_shell_with(base);

    assert!(shell.login("secret").await);

    let flags = shell.session_flags();
    assert!(flags.authenticated);
    assert!(flags.insecure);
    assert_eq!(local.get(TOKEN_KEY), Some("insecure".to_string()));
    assert_eq!(local.get(INSECURE_KEY), Some("true".to_string()));
}

#[tokio::test]
async fn test_login_rejected_leaves_session_unchanged() {
    let (base, _shutdown) = spawn_auth_server("secret", "abc123").await;
    let (shell, _prefs, local) = memory_shell_with(base);

    assert!(!shell.login("wrong").await);

    assert_eq!(shell.session_flags(), SessionFlags::default());
    assert_eq!(local.get(TOKEN_KEY), None);
    assert_eq!(local.get(INSECURE_KEY), None);
}

#[tokio::test]
async fn test_login_network_failure_leaves_session_unchanged() {
    let base = refused_url().await;
    let (shell, _prefs, local) = memory_shell_with(base);

    assert!(!shell.login("secret").await);

    assert_eq!(shell.session_flags(), SessionFlags::default());
    assert_eq!(local.get(TOKEN_KEY), None);
}

#[tokio::test]
async fn test_login_malformed_response_leaves_session_unchanged() {
    let (base, _shutdown) = spawn_plaintext_auth_server().await;
    let (shell, _prefs, local) = memory_shell_with(base);

    // 2xx without a token document is a failed login, not a panic or an error
    assert!(!shell.login("secret").await);

    assert_eq!(shell.session_flags(), SessionFlags::default());
    assert_eq!(local.get(TOKEN_KEY), None);
    assert_eq!(local.get(INSECURE_KEY), None);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (base, _shutdown) = spawn_auth_server("secret", "abc123").await;
    let (shell, _prefs, local) = memory_shell_with(base);

    assert!(shell.login("secret").await);
    assert!(shell.session_flags().authenticated);

    shell.logout();
    let after_first = (shell.session_flags(), local.get(TOKEN_KEY), local.get(INSECURE_KEY));

    shell.logout();
    let after_second = (shell.session_flags(), local.get(TOKEN_KEY), local.get(INSECURE_KEY));

    assert_eq!(after_first, after_second);
    assert_eq!(after_first.0, SessionFlags::default());
    assert_eq!(after_first.1, None);
    assert_eq!(after_first.2, None);
}

#[tokio::test]
async fn test_initial_session_seeded_from_local_store() {
    let local = Arc::new(InMemoryLocal::new());
    local.set(TOKEN_KEY, "insecure");
    local.set(INSECURE_KEY, "true");

    let session = SessionState::new(local, AuthClient::new(super::helpers::unused_url()));

    let flags = session.flags();
    assert!(flags.authenticated);
    assert!(flags.insecure);
}

#[tokio::test]
async fn test_relogin_after_insecure_clears_flag() {
    let (base, _shutdown) = spawn_auth_server("secret", "insecure").await;
    let (shell, _prefs, _local) = memory_shell_with(base.clone());

    assert!(shell.login("secret").await);
    assert!(shell.session_flags().insecure);

    shell.logout();

    let (base, _shutdown) = spawn_auth_server("secret", "real-token").await;
    let (shell, _prefs, local) = memory_shell_with(base);
    assert!(shell.login("secret").await);
    assert!(!shell.session_flags().insecure);
    assert_eq!(local.get(TOKEN_KEY), Some("real-token".to_string()));
}
