//! Duress settings lifecycle
//!
//! When the user enters their duress PIN instead of the real one, the app
//! switches to a decoy account and shows a decoy username. The settings that
//! drive this live in a single JSON document behind a [`SettingsBackend`];
//! this module owns the cached copy and the read-modify-write cycle.
//!
//! The cache is an explicit instance, not a process global: the application
//! constructs one store, calls [`DuressSettingsStore::init`] once at startup,
//! and hands references to consumers. Reads before `init` are a contract
//! violation and return [`Error::NotInitialized`].

use crate::{Error, Result, SettingsBackend};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// File name of the persisted settings document
pub const DURESS_SETTINGS_FILE: &str = "duressSettings.json";

/// Duress-mode configuration, persisted as one JSON object.
///
/// Every field is optional; a missing or corrupt document decodes to the
/// all-`None` record. Field names stay camelCase on disk for compatibility
/// with documents written by earlier app versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuressSettings {
    /// PIN that activates duress mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duress_pin: Option<String>,

    /// Account to switch to under duress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duress_username: Option<String>,

    /// Whether duress mode is currently active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duress_mode_on: Option<bool>,

    /// Username shown in place of the real one while duress mode is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duress_display_username: Option<String>,

    /// Login identifier shown while duress mode is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duress_display_login_id: Option<String>,
}

impl DuressSettings {
    /// Decode a raw document, degrading to the empty record on any
    /// parse failure
    fn decode_lenient(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::debug!("Unreadable duress settings document, using defaults: {err}");
                Self::default()
            }
        }
    }
}

/// Shallow-merge patch for [`DuressSettings`].
///
/// Each field is a tri-state: `None` keeps the prior value, `Some(None)`
/// clears it, `Some(Some(v))` replaces it. This preserves the original
/// contract that a field explicitly set to "undefined" overwrites.
#[derive(Debug, Clone, Default)]
pub struct DuressSettingsUpdate {
    /// Patch for `duress_pin`
    pub duress_pin: Option<Option<String>>,
    /// Patch for `duress_username`
    pub duress_username: Option<Option<String>>,
    /// Patch for `duress_mode_on`
    pub duress_mode_on: Option<Option<bool>>,
    /// Patch for `duress_display_username`
    pub duress_display_username: Option<Option<String>>,
    /// Patch for `duress_display_login_id`
    pub duress_display_login_id: Option<Option<String>>,
}

impl DuressSettingsUpdate {
    /// Apply the patch to a settings record
    pub fn apply(&self, settings: &mut DuressSettings) {
        if let Some(pin) = &self.duress_pin {
            settings.duress_pin = pin.clone();
        }
        if let Some(username) = &self.duress_username {
            settings.duress_username = username.clone();
        }
        if let Some(on) = &self.duress_mode_on {
            settings.duress_mode_on = *on;
        }
        if let Some(display) = &self.duress_display_username {
            settings.duress_display_username = display.clone();
        }
        if let Some(login_id) = &self.duress_display_login_id {
            settings.duress_display_login_id = login_id.clone();
        }
    }
}

/// Cached, file-backed duress settings store.
///
/// Lifecycle is `uninitialized -> ready`: [`init`](Self::init) loads the
/// document (degrading read/parse failures to the empty record) and fills
/// the cache; [`get`](Self::get) and [`set`](Self::set) fail with
/// [`Error::NotInitialized`] until then. `set` persists the full merged
/// record; concurrent `set` calls are not serialized here, last writer wins,
/// and a torn write is tolerated by the next `init`'s lenient decode.
pub struct DuressSettingsStore<B: SettingsBackend> {
    backend: B,
    cache: RwLock<Option<DuressSettings>>,
}

impl<B: SettingsBackend> DuressSettingsStore<B> {
    /// Create an uninitialized store over a backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: RwLock::new(None),
        }
    }

    /// Load the persisted document and populate the cache.
    ///
    /// Read and parse failures degrade to the empty record. Safe to call
    /// again; each call re-reads the backend and overwrites the cache.
    pub async fn init(&self) -> Result<()> {
        let raw = match self.backend.load().await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!("Duress settings unavailable, using defaults: {err}");
                "{}".to_string()
            }
        };

        let settings = DuressSettings::decode_lenient(&raw);
        log_settings("Duress settings loaded", &settings);
        *self.cache.write() = Some(settings);
        Ok(())
    }

    /// Return the cached settings
    pub fn get(&self) -> Result<DuressSettings> {
        self.cache.read().clone().ok_or(Error::NotInitialized)
    }

    /// Merge a patch into the cached settings and persist the full record.
    ///
    /// Write failures propagate; the cache is only updated after the write
    /// succeeds, so a failed `set` leaves `get` reporting the prior state.
    pub async fn set(&self, update: &DuressSettingsUpdate) -> Result<DuressSettings> {
        let mut merged = self.get()?;
        update.apply(&mut merged);

        let raw = serde_json::to_string(&merged)?;
        self.backend.store(&raw).await?;

        log_settings("Duress settings saved", &merged);
        *self.cache.write() = Some(merged.clone());
        Ok(merged)
    }
}

/// Log a settings transition without leaking field values.
///
/// The PIN and usernames are sensitive; only their presence is recorded.
fn log_settings(message: &str, settings: &DuressSettings) {
    tracing::debug!(
        pin_set = settings.duress_pin.is_some(),
        username_set = settings.duress_username.is_some(),
        mode_on = settings.duress_mode_on.unwrap_or(false),
        display_username_set = settings.duress_display_username.is_some(),
        display_login_id_set = settings.duress_display_login_id.is_some(),
        "{message}",
    );
}
