//! User settings and their bootstrap state machine.
//!
//! The settings record is the one piece of shell state with a durable
//! counterpart. It is loaded exactly once per process through an explicit
//! `Unloaded -> Loading -> Ready` machine, and every later mutation goes
//! through a merge-and-persist operation that writes the full merged record
//! before publishing it in memory. After any successful operation the
//! persisted record and the in-memory record are identical.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    constants::USER_SETTINGS_KEY,
    storage::PreferenceStore,
};

pub mod errors;

pub use errors::SettingsError;

/// The console color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light scheme (the default).
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

/// The full user-settings record.
///
/// Every recognized key carries a default, so the record is always fully
/// populated: a persisted record from an older console version that lacks a
/// key deserializes with that key at its default, which is exactly the
/// merge-over-defaults the bootstrap requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// Preferred color scheme.
    pub color_mode: ColorMode,
}

/// A partial settings record for merge-and-persist updates.
///
/// Fields left as `None` keep their current value; set fields win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    /// New color scheme, if changing.
    pub color_mode: Option<ColorMode>,
}

impl SettingsUpdate {
    /// Shallow-merges this update over `settings`; set fields overwrite.
    pub fn merge_into(&self, settings: &mut UserSettings) {
        if let Some(color_mode) = self.color_mode {
            settings.color_mode = color_mode;
        }
    }
}

/// States of the one-time settings bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// No load attempted yet.
    Unloaded,
    /// The load from the preference store is in flight.
    Loading,
    /// The load completed; settings are usable.
    Ready,
}

/// Settings state: the current record, its bootstrap machine, and the store.
pub struct SettingsState {
    store: Arc<dyn PreferenceStore>,
    state: RwLock<BootstrapState>,
    current: RwLock<UserSettings>,
}

impl SettingsState {
    /// Creates the settings state in `Unloaded`, holding defaults in memory.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store,
            state: RwLock::new(BootstrapState::Unloaded),
            current: RwLock::new(UserSettings::default()),
        }
    }

    /// Current bootstrap state.
    pub fn state(&self) -> BootstrapState {
        *self.state.read().unwrap()
    }

    /// Handle of the preference store backing this settings state.
    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    /// Performs the one-time load from the preference store.
    ///
    /// An existing persisted record is merged over the defaults and published
    /// without a write-back; an absent record triggers a write-back of the
    /// defaults, so the store and memory agree once this returns. Invoking
    /// again after `Ready` is a no-op; invoking while `Loading` is an error.
    ///
    /// On a storage failure the machine returns to `Unloaded` and the error
    /// propagates, leaving both the store and the in-memory defaults
    /// untouched so the caller may retry.
    pub async fn bootstrap(&self) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            match *state {
                BootstrapState::Ready => return Ok(()),
                BootstrapState::Loading => return Err(SettingsError::BootstrapInProgress.into()),
                BootstrapState::Unloaded => *state = BootstrapState::Loading,
            }
        }

        match self.load().await {
            Ok(()) => {
                *self.state.write().unwrap() = BootstrapState::Ready;
                tracing::debug!("User settings bootstrap complete");
                Ok(())
            }
            Err(e) => {
                *self.state.write().unwrap() = BootstrapState::Unloaded;
                Err(e)
            }
        }
    }

    async fn load(&self) -> Result<()> {
        match self.store.get_item::<UserSettings>(USER_SETTINGS_KEY).await? {
            Some(persisted) => {
                // Missing keys deserialized at their defaults: this is the
                // merge of the persisted record over the default record.
                *self.current.write().unwrap() = persisted;
            }
            None => {
                let defaults = self.current.read().unwrap().clone();
                self.store.set_item(USER_SETTINGS_KEY, &defaults).await?;
            }
        }
        Ok(())
    }

    /// Returns a defensive copy of the current in-memory record.
    pub fn get_user_settings(&self) -> UserSettings {
        self.current.read().unwrap().clone()
    }

    /// Merges `update` over the current record, persists the full merged
    /// record, then publishes it in memory.
    ///
    /// After this settles successfully the persisted record equals the
    /// in-memory record. A persistence failure propagates and skips the
    /// publish step, so memory keeps the pre-update record.
    ///
    /// The merge base is read before the persist suspends: two calls issued
    /// back-to-back without awaiting the first merge over the same base, and
    /// the second write clobbers the first. Callers that care must serialize
    /// their writes.
    pub async fn update_user_settings(&self, update: SettingsUpdate) -> Result<()> {
        {
            let state = self.state.read().unwrap();
            if *state != BootstrapState::Ready {
                return Err(SettingsError::NotReady { state: *state }.into());
            }
        }

        let merged = {
            let current = self.current.read().unwrap();
            let mut merged = current.clone();
            update.merge_into(&mut merged);
            merged
        };

        self.store.set_item(USER_SETTINGS_KEY, &merged).await?;
        *self.current.write().unwrap() = merged;
        Ok(())
    }
}
