use thiserror::Error;

/// Errors surfaced by secure store backends.
///
/// "Not found" is not an error: `get` reports it as `Ok(None)` and
/// `delete` treats it as success. Only genuine operation failures
/// land here.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid store key: {0}")]
    InvalidKey(String),

    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("store read failed: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("store write failed: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("store delete failed: {0}")]
    DeleteFailed(#[source] std::io::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
