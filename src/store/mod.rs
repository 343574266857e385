//! Secure store backends.
//!
//! Provides the byte-oriented key-value abstraction the cache persists
//! through, with implementations for different storage backends.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `SecureStore` trait
//! 2. Add the implementation in a new file (e.g., `keychain.rs`, `vault.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Vault { /* ... */ }
//!
//! impl SecureStore for Vault {
//!     fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
//!         // Fetch from the vault; Ok(None) when the entry is absent
//!     }
//!     fn set(&self, key: &str, value: &[u8]) -> Result<()> {
//!         // Create or overwrite the entry
//!     }
//!     fn delete(&self, key: &str) -> Result<()> {
//!         // Remove the entry; absent entries are not an error
//!     }
//! }
//! ```

use crate::error::Result;

mod fs;
mod memory;

pub use fs::FilesystemStore;
pub use memory::MemoryStore;

/// Secure key-value byte store.
///
/// Abstracts the persistence layer behind
/// [`SecretCache`](crate::cache::SecretCache) to support multiple
/// backends (filesystem, OS credential vault, remote KMS, etc.).
///
/// Implementations must serialize their own internal operations: the
/// cache dispatches writes from background threads, so a store is shared
/// across threads via `Arc`.
pub trait SecureStore: Send + Sync {
    /// Read the bytes stored under `key`.
    ///
    /// # Returns
    ///
    /// `Ok(Some(bytes))` when the entry exists, `Ok(None)` when it does
    /// not. A missing entry is never an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Create or overwrite the entry under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the entry under `key`.
    ///
    /// Deleting an absent entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be modified.
    fn delete(&self, key: &str) -> Result<()>;
}
