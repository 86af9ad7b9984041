//! Integration tests: duress settings store over the real settings file

use galleon_login_core::{DuressSettingsStore, DuressSettingsUpdate, Error};
use galleon_login_storage::SettingsFile;
use tempfile::TempDir;

fn init_logging() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();
}

fn update_pin(pin: &str) -> DuressSettingsUpdate {
    DuressSettingsUpdate {
        duress_pin: Some(Some(pin.to_string())),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fresh_install_starts_empty() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let store = DuressSettingsStore::new(SettingsFile::new(dir.path()));

    store.init().await.unwrap();
    let settings = store.get().unwrap();
    assert_eq!(settings.duress_pin, None);
    assert_eq!(settings.duress_mode_on, None);
}

#[tokio::test]
async fn test_settings_survive_restart() {
    init_logging();
    let dir = TempDir::new().unwrap();

    {
        let store = DuressSettingsStore::new(SettingsFile::new(dir.path()));
        store.init().await.unwrap();
        store.set(&update_pin("0000")).await.unwrap();
        store
            .set(&DuressSettingsUpdate {
                duress_mode_on: Some(Some(true)),
                duress_display_username: Some(Some("decoy".to_string())),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    // A second process start sees the merged record.
    let store = DuressSettingsStore::new(SettingsFile::new(dir.path()));
    store.init().await.unwrap();
    let settings = store.get().unwrap();
    assert_eq!(settings.duress_pin.as_deref(), Some("0000"));
    assert_eq!(settings.duress_mode_on, Some(true));
    assert_eq!(settings.duress_display_username.as_deref(), Some("decoy"));
}

#[tokio::test]
async fn test_corrupt_file_degrades_to_defaults() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let file = SettingsFile::new(dir.path());
    tokio::fs::write(file.path(), b"{\"duressPin\": \"00")
        .await
        .unwrap();

    let store = DuressSettingsStore::new(file);
    store.init().await.unwrap();
    assert_eq!(store.get().unwrap().duress_pin, None);

    // A save after the degrade writes a clean document again.
    store.set(&update_pin("1111")).await.unwrap();
    let store2 = DuressSettingsStore::new(SettingsFile::new(dir.path()));
    store2.init().await.unwrap();
    assert_eq!(store2.get().unwrap().duress_pin.as_deref(), Some("1111"));
}

#[tokio::test]
async fn test_init_twice_reads_same_state() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let store = DuressSettingsStore::new(SettingsFile::new(dir.path()));

    store.init().await.unwrap();
    store.set(&update_pin("2222")).await.unwrap();
    let first = store.get().unwrap();

    store.init().await.unwrap();
    assert_eq!(store.get().unwrap(), first);
}

#[tokio::test]
async fn test_get_before_init_is_typed_error() {
    let dir = TempDir::new().unwrap();
    let store = DuressSettingsStore::new(SettingsFile::new(dir.path()));
    assert!(matches!(store.get(), Err(Error::NotInitialized)));
}

#[tokio::test]
async fn test_document_on_disk_is_camel_case() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let file = SettingsFile::new(dir.path());
    let path = file.path().to_path_buf();

    let store = DuressSettingsStore::new(file);
    store.init().await.unwrap();
    store.set(&update_pin("3333")).await.unwrap();

    let raw = tokio::fs::read_to_string(path).await.unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["duressPin"], "3333");
}
