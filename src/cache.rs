//! Typed secret cache with write-through persistence.
//!
//! A [`SecretCache`] holds one optional value in memory and mirrors it
//! into a single slot of a [`SecureStore`] on every `set`. Reads never
//! touch the store; an explicit [`reload`](SecretCache::reload)
//! re-decodes from the environment override or the store.
//!
//! All store and decode failures degrade to `None` or to a skipped
//! write. The in-memory value is the source of truth for the rest of
//! the process lifetime, so callers cannot distinguish "no secret
//! configured" from "store inaccessible"; swallowed failures are
//! reported through `tracing` instead.

use std::sync::Arc;
use std::thread;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::mode::RuntimeMode;
use crate::store::SecureStore;
use crate::value::FromEnvText;

/// Typed, cached view over one slot of a secure store.
///
/// Not internally synchronized: one logical owner per instance. Only the
/// persistence step of [`set`](Self::set) runs off-thread.
pub struct SecretCache<T> {
    service_key: String,
    store: Arc<dyn SecureStore>,
    mode: RuntimeMode,
    cached: Option<T>,
}

impl<T> SecretCache<T>
where
    T: Serialize + DeserializeOwned + FromEnvText,
{
    /// Bind a cache to `service_key` and decode the initial value.
    ///
    /// Construction never fails: a failed decode leaves the cache empty.
    pub fn new(
        service_key: impl Into<String>,
        store: Arc<dyn SecureStore>,
        mode: RuntimeMode,
    ) -> Self {
        let mut cache = Self {
            service_key: service_key.into(),
            store,
            mode,
            cached: None,
        };
        cache.reload();
        cache
    }

    /// The store slot this cache is bound to.
    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    /// The in-memory value. No I/O.
    pub fn get(&self) -> Option<&T> {
        self.cached.as_ref()
    }

    /// Replace the in-memory value and persist it in the background.
    ///
    /// The cache is updated before any I/O: `get` observes the new value
    /// as soon as `set` returns. Persistence is best-effort:
    ///
    /// - in debug mode the store is left untouched;
    /// - `Some(v)` is serialized and written; a value that fails to
    ///   serialize deletes the entry instead;
    /// - `None` deletes the entry;
    /// - store failures are logged and swallowed.
    ///
    /// The returned [`PersistTask`] may be dropped (fire-and-forget,
    /// the default) or awaited with [`PersistTask::wait`]. Overlapping
    /// `set` calls give no ordering guarantee between their store
    /// writes; only the in-memory value reflects the latest call.
    pub fn set(&mut self, value: Option<T>) -> PersistTask {
        self.cached = value;

        if self.mode.debug {
            debug!(key = %self.service_key, "debug build, skipping persistence");
            return PersistTask::noop();
        }

        let action = match self.cached.as_ref().map(serde_json::to_vec) {
            Some(Ok(bytes)) => PersistAction::Write(bytes),
            Some(Err(e)) => {
                // An unserializable value is equivalent to no value
                warn!(key = %self.service_key, error = %e, "secret not serializable, deleting entry");
                PersistAction::Delete
            }
            None => PersistAction::Delete,
        };

        let store = Arc::clone(&self.store);
        let key = self.service_key.clone();
        PersistTask {
            handle: Some(thread::spawn(move || persist(&*store, &key, action))),
        }
    }

    /// Recompute the in-memory value, overwriting it unconditionally.
    ///
    /// Decode priority: preview mode yields `None` without touching the
    /// store; an environment variable named exactly `service_key` is
    /// built through [`FromEnvText`], bypassing the store; otherwise the
    /// store entry is read and JSON-decoded. Any failure yields `None`.
    pub fn reload(&mut self) {
        self.cached = self.decode();
    }

    fn decode(&self) -> Option<T> {
        if self.mode.preview {
            return None;
        }

        // Non-UTF-8 values are treated as absent and fall through
        if let Ok(text) = std::env::var(&self.service_key) {
            debug!(key = %self.service_key, "loaded secret from environment override");
            return Some(T::from_env_text(&text));
        }

        let mut bytes = match self.store.get(&self.service_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %self.service_key, "no entry in secure store");
                return None;
            }
            Err(e) => {
                warn!(key = %self.service_key, error = %e, "secure store read failed");
                return None;
            }
        };

        let decoded = match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %self.service_key, error = %e, "stored secret failed to decode");
                None
            }
        };
        bytes.zeroize();
        decoded
    }
}

impl<T> std::fmt::Debug for SecretCache<T> {
    // Never print the cached value, only whether one is present
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCache")
            .field("service_key", &self.service_key)
            .field("mode", &self.mode)
            .field("cached", &self.cached.is_some())
            .finish()
    }
}

enum PersistAction {
    Write(Vec<u8>),
    Delete,
}

/// Run one persistence action to completion, swallowing failures.
fn persist(store: &dyn SecureStore, key: &str, action: PersistAction) {
    match action {
        PersistAction::Write(mut bytes) => {
            if let Err(e) = store.set(key, &bytes) {
                warn!(key = %key, error = %e, "secure store write failed");
            }
            bytes.zeroize();
        }
        PersistAction::Delete => {
            if let Err(e) = store.delete(key) {
                warn!(key = %key, error = %e, "secure store delete failed");
            }
        }
    }
}

/// Handle to a background persistence operation.
///
/// Dropping the handle detaches the operation (fire-and-forget); the
/// write still runs to completion or failure. [`wait`](Self::wait)
/// blocks until it has finished. There is no cancellation.
pub struct PersistTask {
    handle: Option<thread::JoinHandle<()>>,
}

impl PersistTask {
    /// A task that had nothing to do (debug-mode `set`).
    fn noop() -> Self {
        Self { handle: None }
    }

    /// Block until the persistence operation has finished.
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("persistence task panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    fn release_cache(key: &str, store: Arc<MemoryStore>) -> SecretCache<String> {
        SecretCache::new(key, store, RuntimeMode::RELEASE)
    }

    #[test]
    fn test_new_decodes_existing_entry() {
        let store = Arc::new(MemoryStore::new());
        store.set("cache-unit-existing", b"\"hunter2\"").unwrap();

        let cache = release_cache("cache-unit-existing", store);
        assert_eq!(cache.get(), Some(&"hunter2".to_string()));
    }

    #[test]
    fn test_new_with_empty_store_is_none() {
        let store = Arc::new(MemoryStore::new());
        let cache = release_cache("cache-unit-empty", store);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_malformed_entry_decodes_to_none() {
        let store = Arc::new(MemoryStore::new());
        store.set("cache-unit-malformed", b"not json").unwrap();

        let cache = release_cache("cache-unit-malformed", store);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_set_updates_cache_before_persistence_finishes() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = release_cache("cache-unit-sync", store);

        let task = cache.set(Some("token".to_string()));
        // Visible immediately, independent of the background write
        assert_eq!(cache.get(), Some(&"token".to_string()));
        task.wait();
    }

    #[test]
    fn test_set_persists_json_encoding() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = release_cache("cache-unit-persist", store.clone());

        cache.set(Some("abc123".to_string())).wait();
        assert_eq!(
            store.get("cache-unit-persist").unwrap().unwrap(),
            b"\"abc123\""
        );
    }

    #[test]
    fn test_set_none_deletes_entry() {
        let store = Arc::new(MemoryStore::new());
        store.set("cache-unit-clear", b"\"old\"").unwrap();

        let mut cache = release_cache("cache-unit-clear", store.clone());
        cache.set(None).wait();

        assert!(cache.get().is_none());
        assert!(store.get("cache-unit-clear").unwrap().is_none());
    }

    /// A value whose serialization and deserialization always fail.
    struct Broken;

    impl Serialize for Broken {
        fn serialize<S: Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("broken"))
        }
    }

    impl<'de> Deserialize<'de> for Broken {
        fn deserialize<D: Deserializer<'de>>(_d: D) -> Result<Self, D::Error> {
            Err(serde::de::Error::custom("broken"))
        }
    }

    impl FromEnvText for Broken {
        fn from_env_text(_text: &str) -> Self {
            Broken
        }
    }

    #[test]
    fn test_unserializable_value_deletes_entry() {
        let store = Arc::new(MemoryStore::new());
        store.set("cache-unit-broken", b"\"stale\"").unwrap();

        let mut cache: SecretCache<Broken> =
            SecretCache::new("cache-unit-broken", store.clone(), RuntimeMode::RELEASE);
        cache.set(Some(Broken)).wait();

        // In memory the value is present, but the entry is gone
        assert!(cache.get().is_some());
        assert!(store.get("cache-unit-broken").unwrap().is_none());
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = release_cache("cache-unit-redact", store);
        cache.set(Some("s3cr3t".to_string())).wait();

        let printed = format!("{cache:?}");
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("cache-unit-redact"));
    }
}
