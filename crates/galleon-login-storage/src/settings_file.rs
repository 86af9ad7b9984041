//! File-backed duress settings document
//!
//! One JSON file in the app's private data directory. The core treats a
//! failed `load` as the empty document, so a missing file, a torn write, or
//! a first launch all land in the same place.

use async_trait::async_trait;
use galleon_login_core::{Error, Result, SettingsBackend, DURESS_SETTINGS_FILE};
use std::path::{Path, PathBuf};

/// Settings document stored as a single file on disk
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    /// Store the document as `duressSettings.json` inside `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DURESS_SETTINGS_FILE),
        }
    }

    /// Store the document at an exact path
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the document in the app's private per-user data directory
    pub fn in_app_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "Galleon", "GalleonWallet")
            .ok_or_else(|| Error::Storage("no home directory available".to_string()))?;
        Ok(Self::new(dirs.data_local_dir()))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsBackend for SettingsFile {
    async fn load(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| Error::Storage(format!("read {}: {err}", self.path.display())))
    }

    async fn store(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| Error::Storage(format!("mkdir {}: {err}", parent.display())))?;
        }
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|err| Error::Storage(format!("write {}: {err}", self.path.display())))?;
        tracing::debug!("Duress settings document written to {}", self.path.display());
        Ok(())
    }
}
