//! Persistence capability traits
//!
//! The core never touches the filesystem directly. Concrete backends live
//! in `galleon-login-storage`; tests use the in-memory doubles from
//! [`crate::testing`].

use crate::Result;
use async_trait::async_trait;

/// Backend for the single duress settings document.
///
/// `load` returns the raw document text; a missing or unreadable file is an
/// `Err`, which the settings store degrades to the empty document.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Read the full document
    async fn load(&self) -> Result<String>;

    /// Replace the full document
    async fn store(&self, contents: &str) -> Result<()>;
}

/// Namespaced asynchronous string-to-string store.
///
/// Mirrors the data-store surface the account SDK exposes: values are scoped
/// per named store, and reads/writes may fail independently.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` when the key was never written
    async fn get_item(&self, store_id: &str, key: &str) -> Result<Option<String>>;

    /// Write a value (whole-value replace, last writer wins)
    async fn set_item(&self, store_id: &str, key: &str, value: &str) -> Result<()>;
}
