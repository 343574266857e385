//! Squirrel - typed secret caching over pluggable secure stores.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cache       # SecretCache and the background persistence task
//! ├── mode        # debug/preview runtime flags
//! ├── value       # plain-text construction for environment overrides
//! ├── store/      # secure store backends
//! │   ├── mod     # SecureStore trait
//! │   ├── fs      # filesystem implementation
//! │   └── memory  # in-memory implementation
//! └── error       # error types
//! ```
//!
//! # Features
//!
//! - Typed in-memory cache over one slot of a secure key-value store
//! - Write-through persistence on a background task, best-effort
//! - Environment-variable override for local development
//! - Debug-build and preview-mode bypasses, passed in explicitly
//! - Extensible storage backends behind the `SecureStore` trait
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use squirrel::{MemoryStore, RuntimeMode, SecretCache};
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut cache: SecretCache<String> =
//!     SecretCache::new("example-api-token", store, RuntimeMode::RELEASE);
//!
//! cache.set(Some("abc123".to_string())).wait();
//! assert_eq!(cache.get(), Some(&"abc123".to_string()));
//! ```

pub mod cache;
pub mod error;
pub mod mode;
pub mod store;
pub mod value;

pub use cache::{PersistTask, SecretCache};
pub use error::{Result, StoreError};
pub use mode::RuntimeMode;
pub use store::{FilesystemStore, MemoryStore, SecureStore};
pub use value::FromEnvText;
