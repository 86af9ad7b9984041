//! On-disk key-value store
//!
//! Flat files under `<root>/<store_id>/<key>`, holding the raw string value.
//! Store ids and keys double as path components, so they are validated
//! before touching the filesystem.

use async_trait::async_trait;
use galleon_login_core::{Error, KeyValueStore, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Namespaced string store backed by one file per key
pub struct DiskKeyValueStore {
    root: PathBuf,
}

impl DiskKeyValueStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store_dir(&self, store_id: &str) -> Result<PathBuf> {
        validate_name("store id", store_id)?;
        Ok(self.root.join(store_id))
    }

    fn entry_path(&self, store_id: &str, key: &str) -> Result<PathBuf> {
        validate_name("key", key)?;
        Ok(self.store_dir(store_id)?.join(key))
    }
}

/// Reject names that would escape the store directory or surprise the
/// filesystem. Dots are allowed (store ids like `app.edge.login`), path
/// separators and traversal are not.
fn validate_name(what: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(Error::Validation(format!("invalid {what}: {name:?}")))
    }
}

#[async_trait]
impl KeyValueStore for DiskKeyValueStore {
    async fn get_item(&self, store_id: &str, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(store_id, key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Storage(format!("read {}: {err}", path.display()))),
        }
    }

    async fn set_item(&self, store_id: &str, key: &str, value: &str) -> Result<()> {
        let dir = self.store_dir(store_id)?;
        let path = self.entry_path(store_id, key)?;
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| Error::Storage(format!("mkdir {}: {err}", dir.display())))?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|err| Error::Storage(format!("write {}: {err}", path.display())))?;
        Ok(())
    }
}
