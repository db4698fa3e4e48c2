//! The shell: composition root of the admin console client.
//!
//! `Shell` owns the four shared concerns (preference store, settings state,
//! session state, update signal) and sequences their initialization. Session
//! flags are seeded synchronously at `open`; the settings record requires the
//! one asynchronous `bootstrap` step, and the capability accessors refuse to
//! hand anything out until it has completed. That refusal is the explicit
//! happens-before gate: a component holding a [`SettingsCapability`] can rely
//! on the bootstrap load having finished before any update it issues.
//!
//! Capabilities are constructed fresh on every accessor call. They are stable
//! in behavior (closures over the same shell), not by reference; consumers
//! must not rely on handle identity.

use std::fmt;
use std::sync::Arc;

use crate::{
    Result,
    session::{AuthClient, SessionFlags, SessionState, store::LocalStore},
    settings::{BootstrapState, SettingsState, SettingsUpdate, UserSettings},
    storage::PreferenceStore,
    update::{UpdateNotifier, UpdateSignal},
};

pub mod errors;

pub use errors::ShellError;

struct ShellInternal {
    settings: SettingsState,
    session: SessionState,
    update: UpdateSignal,
}

/// Cheap-to-clone handle over the shell state.
///
/// All clones share the same underlying state; clone freely to hand the shell
/// to capability objects or background tasks.
#[derive(Clone)]
pub struct Shell {
    inner: Arc<ShellInternal>,
}

impl Shell {
    /// Opens the shell over the injected stores and auth client.
    ///
    /// Session flags are derived synchronously from `local` here; settings
    /// start `Unloaded` and need [`bootstrap`](Shell::bootstrap) before the
    /// capability accessors will serve.
    pub fn open(
        prefs: Arc<dyn PreferenceStore>,
        local: Arc<dyn LocalStore>,
        auth: AuthClient,
    ) -> Self {
        Self {
            inner: Arc::new(ShellInternal {
                settings: SettingsState::new(prefs),
                session: SessionState::new(local, auth),
                update: UpdateSignal::new(),
            }),
        }
    }

    // === Bootstrap sequencing ===

    /// Runs the one-time settings load from the preference store.
    ///
    /// Until this returns `Ok`, [`settings`](Shell::settings) and
    /// [`storage`](Shell::storage) refuse with [`ShellError::NotReady`]. A
    /// storage failure leaves the machine in `Unloaded` and may be retried.
    pub async fn bootstrap(&self) -> Result<()> {
        self.inner.settings.bootstrap().await
    }

    /// Current state of the settings bootstrap machine.
    pub fn bootstrap_state(&self) -> BootstrapState {
        self.inner.settings.state()
    }

    fn require_ready(&self) -> Result<()> {
        let state = self.bootstrap_state();
        if state != BootstrapState::Ready {
            return Err(ShellError::NotReady { state }.into());
        }
        Ok(())
    }

    // === Capability distribution ===

    /// Settings capability for descendant components.
    ///
    /// Refuses until the bootstrap has reached `Ready`.
    pub fn settings(&self) -> Result<SettingsCapability> {
        self.require_ready()?;
        Ok(SettingsCapability {
            shell: self.clone(),
        })
    }

    /// Storage capability for descendant components.
    ///
    /// Refuses until the bootstrap has reached `Ready`.
    pub fn storage(&self) -> Result<StorageCapability> {
        self.require_ready()?;
        Ok(StorageCapability {
            shell: self.clone(),
        })
    }

    // === Session operations ===

    /// Submits `password` to the auth endpoint; see
    /// [`SessionState::login`](crate::session::SessionState::login).
    pub async fn login(&self, password: &str) -> bool {
        self.inner.session.login(password).await
    }

    /// Ends the session. Synchronous and idempotent.
    pub fn logout(&self) {
        self.inner.session.logout()
    }

    /// Read-only copy of the session flags, for the route/chrome collaborators.
    pub fn session_flags(&self) -> SessionFlags {
        self.inner.session.flags()
    }

    // === Update signal ===

    /// Whether the update checker has reported a new version.
    pub fn update_available(&self) -> bool {
        self.inner.update.is_available()
    }

    /// Write-only handle to register with the update-checker collaborator.
    pub fn update_notifier(&self) -> UpdateNotifier {
        self.inner.update.notifier()
    }
}

/// Read/write access to the user settings, handed out below the bootstrap
/// gate.
#[derive(Clone)]
pub struct SettingsCapability {
    shell: Shell,
}

impl SettingsCapability {
    /// Returns a defensive copy of the current settings record.
    pub fn get_user_settings(&self) -> UserSettings {
        self.shell.inner.settings.get_user_settings()
    }

    /// Merge-and-persist update; see
    /// [`SettingsState::update_user_settings`](crate::settings::SettingsState::update_user_settings)
    /// for the consistency and lost-update semantics.
    pub async fn update_user_settings(&self, update: SettingsUpdate) -> Result<()> {
        self.shell.inner.settings.update_user_settings(update).await
    }
}

impl fmt::Debug for SettingsCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsCapability").finish_non_exhaustive()
    }
}

/// Access to the durable preference store itself, for pages that persist
/// additional keys without widening the settings contract.
#[derive(Clone)]
pub struct StorageCapability {
    shell: Shell,
}

impl StorageCapability {
    /// Handle of the shared preference store.
    pub fn get_persisted_storage(&self) -> Arc<dyn PreferenceStore> {
        self.shell.inner.settings.store().clone()
    }
}

impl fmt::Debug for StorageCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCapability").finish_non_exhaustive()
    }
}
