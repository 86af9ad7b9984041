//! Test doubles for the capability traits
//!
//! In-memory stand-ins for the settings backend, the key-value store, the
//! account, and the prompt UI. Used by this crate's own tests and, behind
//! the `test-helpers` feature, by downstream integration suites.

use crate::{
    Account, Error, KeyValueStore, ReminderChoice, ReminderKind, ReminderUi, Result,
    SettingsBackend,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory settings document with switchable failure injection
#[derive(Default)]
pub struct MemorySettingsBackend {
    contents: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemorySettingsBackend {
    /// Create an empty backend (no document yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored document directly
    pub fn put(&self, contents: &str) {
        *self.contents.lock() = Some(contents.to_string());
    }

    /// Inspect the stored document
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }

    /// Make subsequent `load` calls fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `store` calls fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsBackend for MemorySettingsBackend {
    async fn load(&self) -> Result<String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected read failure".to_string()));
        }
        self.contents
            .lock()
            .clone()
            .ok_or_else(|| Error::Storage("no settings document".to_string()))
    }

    async fn store(&self, contents: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected write failure".to_string()));
        }
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }
}

/// In-memory key-value store with access counters and failure injection
#[derive(Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<(String, String), String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value without counting it as a trait access
    pub fn seed(&self, store_id: &str, key: &str, value: &str) {
        self.items
            .lock()
            .insert((store_id.to_string(), key.to_string()), value.to_string());
    }

    /// Inspect a value without counting it as a trait access
    pub fn value(&self, store_id: &str, key: &str) -> Option<String> {
        self.items
            .lock()
            .get(&(store_id.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of `get_item` calls observed
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `set_item` calls observed
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent `get_item` calls fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `set_item` calls fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get_item(&self, store_id: &str, key: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected read failure".to_string()));
        }
        Ok(self.value(store_id, key))
    }

    async fn set_item(&self, store_id: &str, key: &str, value: &str) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected write failure".to_string()));
        }
        self.seed(store_id, key, value);
        Ok(())
    }
}

/// Scriptable account double
pub struct MockAccount {
    username: Option<String>,
    otp_key: Option<String>,
    created: Option<DateTime<Utc>>,
    enable_calls: AtomicUsize,
    store: MemoryKeyValueStore,
}

impl MockAccount {
    /// Secret returned by `enable_otp`
    pub const TEST_SECRET: &'static str = "GEZDGNBVGY3TQOJQ";

    /// Account with a username, no OTP, and an unknown creation time
    pub fn new() -> Self {
        Self {
            username: Some("test-user".to_string()),
            otp_key: None,
            created: None,
            enable_calls: AtomicUsize::new(0),
            store: MemoryKeyValueStore::new(),
        }
    }

    /// Pretend OTP is already enabled
    pub fn with_otp_key(mut self, key: &str) -> Self {
        self.otp_key = Some(key.to_string());
        self
    }

    /// Drop the username (PIN-only login)
    pub fn without_username(mut self) -> Self {
        self.username = None;
        self
    }

    /// Set the creation time relative to now
    pub fn with_created_days_ago(mut self, days: i64) -> Self {
        self.created = Some(Utc::now() - Duration::days(days));
        self
    }

    /// The account's backing store, for seeding and inspection
    pub fn store(&self) -> &MemoryKeyValueStore {
        &self.store
    }

    /// Number of `enable_otp` calls observed
    pub fn enable_otp_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockAccount {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Account for MockAccount {
    fn username(&self) -> Option<String> {
        self.username.clone()
    }

    fn otp_key(&self) -> Option<String> {
        self.otp_key.clone()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    async fn enable_otp(&self) -> Result<String> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::TEST_SECRET.to_string())
    }

    fn data_store(&self) -> &dyn KeyValueStore {
        &self.store
    }
}

/// Prompt UI double that answers every prompt with one scripted choice
pub struct ScriptedUi {
    choice: Option<ReminderChoice>,
    prompts: Mutex<Vec<ReminderKind>>,
    secrets: Mutex<Vec<String>>,
    keyboard_dismissals: AtomicUsize,
}

impl ScriptedUi {
    /// Answer every prompt with `choice`; `None` means the user dismissed it
    pub fn new(choice: Option<ReminderChoice>) -> Self {
        Self {
            choice,
            prompts: Mutex::new(Vec::new()),
            secrets: Mutex::new(Vec::new()),
            keyboard_dismissals: AtomicUsize::new(0),
        }
    }

    /// Prompts shown, in order
    pub fn prompts(&self) -> Vec<ReminderKind> {
        self.prompts.lock().clone()
    }

    /// Secrets acknowledged, in order
    pub fn secrets(&self) -> Vec<String> {
        self.secrets.lock().clone()
    }

    /// Number of keyboard dismissals observed
    pub fn keyboard_dismissals(&self) -> usize {
        self.keyboard_dismissals.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReminderUi for ScriptedUi {
    async fn dismiss_keyboard(&self) {
        self.keyboard_dismissals.fetch_add(1, Ordering::SeqCst);
    }

    async fn show_reminder(&self, kind: ReminderKind) -> Option<ReminderChoice> {
        self.prompts.lock().push(kind);
        self.choice
    }

    async fn show_otp_secret(&self, secret: &str) {
        self.secrets.lock().push(secret.to_string());
    }
}
