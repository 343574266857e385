//! Filesystem-based secure store implementation.
//!
//! Stores each entry as one file under a root directory
//! (`~/.squirrel/store/` by default) with restricted permissions.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::SecureStore;
use crate::error::{Result, StoreError};

/// Filesystem-based secure store.
///
/// Stores entries in `<root>/<key>.secret`, created with mode 0600 on
/// Unix. Keys are restricted to a flat namespace: path separators and
/// dot-prefixed names are rejected so a key can never escape the root.
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    /// Create a store rooted at `root`. The directory is created lazily
    /// on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store at the default location (`~/.squirrel/store`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDir` if the home directory cannot be
    /// determined.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(Self::new(home.join(".squirrel").join("store")))
    }

    /// Path of the file backing `key`, after key validation.
    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.secret")))
    }
}

/// Reject keys that could resolve outside the store root.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || key.starts_with('.')
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0')
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl SecureStore for FilesystemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root).map_err(StoreError::WriteFailed)?;
        fs::write(&path, value).map_err(StoreError::WriteFailed)?;

        // Restrict permissions on the entry file (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(StoreError::WriteFailed)?;
        }

        debug!(key = %key, path = %path.display(), "stored entry");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Absent entries are not an error for delete
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteFailed(e)),
        }
    }
}
