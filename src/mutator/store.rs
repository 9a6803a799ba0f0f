//! The injected filesystem provider.

use crate::error::PatchlockError;
use crate::fs::atomic_write_text;
use std::path::Path;

/// Failure from a provider call.
#[derive(Debug)]
pub enum StoreError {
    /// The provider needs interactive credential collection before it will
    /// honor any call. Distinct from an error: the caller retries the whole
    /// mutation once credentials exist.
    CredentialsRequired,

    /// Plain I/O failure.
    Io(String),
}

/// Read/write access to the target config document.
///
/// Implementations may front remote or privilege-separated filesystems that
/// demand out-of-band credentials; they signal that through
/// [`StoreError::CredentialsRequired`] rather than by failing.
pub trait ConfigStore {
    /// Whether a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the full document text.
    fn read(&self, path: &Path) -> Result<String, StoreError>;

    /// Replace the document text.
    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError>;
}

/// Provider backed by the local filesystem. Writes are atomic and it never
/// requires credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl ConfigStore for LocalStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> Result<String, StoreError> {
        std::fs::read_to_string(path).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), StoreError> {
        atomic_write_text(path, contents).map_err(|e| match e {
            PatchlockError::Write { message, .. } => StoreError::Io(message),
            other => StoreError::Io(other.to_string()),
        })
    }
}
