//! Filesystem backend tests through the full cache path.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use squirrel::{FilesystemStore, FromEnvText, RuntimeMode, SecretCache, SecureStore};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ApiToken(String);

impl FromEnvText for ApiToken {
    fn from_env_text(text: &str) -> Self {
        ApiToken(text.to_string())
    }
}

#[test]
fn test_release_roundtrip_on_disk() {
    let tmp = TempDir::new().unwrap();
    let store = Arc::new(FilesystemStore::new(tmp.path()));

    let mut cache: SecretCache<ApiToken> =
        SecretCache::new("api-token", store.clone(), RuntimeMode::RELEASE);
    cache.set(Some(ApiToken("abc123".to_string()))).wait();

    // Store holds the structured encoding
    assert_eq!(store.get("api-token").unwrap().unwrap(), b"\"abc123\"");

    // A fresh instance bound to the same slot decodes it
    let fresh: SecretCache<ApiToken> =
        SecretCache::new("api-token", store.clone(), RuntimeMode::RELEASE);
    assert_eq!(fresh.get(), Some(&ApiToken("abc123".to_string())));

    // Out-of-band delete, then reload
    store.delete("api-token").unwrap();
    let mut stale = fresh;
    stale.reload();
    assert!(stale.get().is_none());
}

#[test]
fn test_corrupt_entry_on_disk_yields_none() {
    let tmp = TempDir::new().unwrap();
    let store = Arc::new(FilesystemStore::new(tmp.path()));
    std::fs::write(tmp.path().join("api-token.secret"), b"\x00\xffgarbage").unwrap();

    let cache: SecretCache<ApiToken> =
        SecretCache::new("api-token", store, RuntimeMode::RELEASE);
    assert!(cache.get().is_none());
}

#[test]
fn test_unreadable_root_degrades_to_none() {
    let tmp = TempDir::new().unwrap();
    // A root that is a file, not a directory, makes reads fail outright
    let bogus_root = tmp.path().join("not-a-dir");
    std::fs::write(&bogus_root, b"").unwrap();

    let store = Arc::new(FilesystemStore::new(bogus_root.join("store")));
    let mut cache: SecretCache<ApiToken> =
        SecretCache::new("api-token", store, RuntimeMode::RELEASE);

    assert!(cache.get().is_none());

    // Writes fail at the backend but never surface to the caller
    cache.set(Some(ApiToken("lost".to_string()))).wait();
    assert_eq!(cache.get(), Some(&ApiToken("lost".to_string())));
}
