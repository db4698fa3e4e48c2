//! Shared helpers for the integration test suite.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{Form, Json, Router, extract::State, http::StatusCode, routing::post};
use courier_console::{
    AuthClient, PreferenceStore, Result, Shell,
    session::store::InMemoryLocal,
    storage::{InMemory, StorageError},
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::oneshot;
use url::Url;

/// Builds a shell over in-memory stores, returning the concrete store handles
/// for inspection. The auth client points at `base`.
pub fn memory_shell_with(base: Url) -> (Shell, Arc<dyn PreferenceStore>, Arc<InMemoryLocal>) {
    let prefs: Arc<dyn PreferenceStore> = Arc::new(InMemory::new());
    let local = Arc::new(InMemoryLocal::new());
    let shell = Shell::open(prefs.clone(), local.clone(), AuthClient::new(base));
    (shell, prefs, local)
}

/// Builds a shell whose auth client points nowhere useful; for tests that
/// never log in.
pub fn memory_shell() -> (Shell, Arc<dyn PreferenceStore>, Arc<InMemoryLocal>) {
    memory_shell_with(unused_url())
}

/// A syntactically valid base URL no test traffic is sent to.
pub fn unused_url() -> Url {
    "http://127.0.0.1:9/".parse().unwrap()
}

/// Preference store decorator counting writes, for asserting that bootstrap
/// does not issue redundant write-backs.
pub struct CountingStore {
    pub inner: InMemory,
    pub sets: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: InMemory::new(),
            sets: AtomicUsize::new(0),
        }
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreferenceStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Preference store that fails a configurable number of reads and writes
/// before delegating, for exercising the bootstrap failure policy.
pub struct FlakyStore {
    pub inner: InMemory,
    pub failing_gets: AtomicUsize,
    pub failing_sets: AtomicUsize,
}

impl FlakyStore {
    pub fn new(failing_gets: usize, failing_sets: usize) -> Self {
        Self {
            inner: InMemory::new(),
            failing_gets: AtomicUsize::new(failing_gets),
            failing_sets: AtomicUsize::new(failing_sets),
        }
    }
}

fn injected_failure() -> courier_console::Error {
    StorageError::FileIo {
        source: std::io::Error::other("injected storage failure"),
    }
    .into()
}

#[async_trait]
impl PreferenceStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.failing_gets.load(Ordering::SeqCst) > 0 {
            self.failing_gets.fetch_sub(1, Ordering::SeqCst);
            return Err(injected_failure());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.failing_sets.load(Ordering::SeqCst) > 0 {
            self.failing_sets.fetch_sub(1, Ordering::SeqCst);
            return Err(injected_failure());
        }
        self.inner.set(key, value).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[derive(Clone)]
struct AuthConfig {
    password: String,
    token: String,
}

#[derive(Deserialize)]
struct AuthForm {
    password: String,
}

async fn handle_auth(
    State(config): State<AuthConfig>,
    Form(body): Form<AuthForm>,
) -> std::result::Result<Json<Value>, StatusCode> {
    if body.password == config.password {
        Ok(Json(serde_json::json!({ "token": config.token })))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

/// Spawns a loopback auth endpoint granting `token` for `password`.
///
/// Returns the server base URL and the shutdown sender; dropping the sender
/// also stops the server.
pub async fn spawn_auth_server(password: &str, token: &str) -> (Url, oneshot::Sender<()>) {
    let config = AuthConfig {
        password: password.to_string(),
        token: token.to_string(),
    };
    let router = Router::new()
        .route("/admin/auth", post(handle_auth))
        .with_state(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind auth server");
    let addr = listener.local_addr().expect("Failed to get local address");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("Auth server failed");
    });

    let base: Url = format!("http://{addr}/")
        .parse()
        .expect("Invalid server URL");
    (base, shutdown_tx)
}

/// Spawns a loopback auth endpoint that accepts any password but answers
/// with a 200 plain-text body instead of the token document.
pub async fn spawn_plaintext_auth_server() -> (Url, oneshot::Sender<()>) {
    let router = Router::new().route("/admin/auth", post(|| async { "not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind auth server");
    let addr = listener.local_addr().expect("Failed to get local address");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("Auth server failed");
    });

    let base: Url = format!("http://{addr}/")
        .parse()
        .expect("Invalid server URL");
    (base, shutdown_tx)
}

/// Spawns and immediately closes a listener, yielding an address that refuses
/// connections.
pub async fn refused_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);
    format!("http://{addr}/")
        .parse()
        .expect("Invalid server URL")
}
