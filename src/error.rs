//! Error types for patchlock.
//!
//! Uses thiserror for derive macros. Every failure a mutation can hit is a
//! reported value, never a panic: lock contention, a provider demanding
//! interactive credentials, and read/write failures all surface as variants
//! the caller can match on and retry later if appropriate.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for patchlock operations.
#[derive(Error, Debug)]
pub enum PatchlockError {
    /// The lock file is held by another live process.
    ///
    /// Nothing was read or written; the caller may retry with its own backoff.
    #[error("lock '{}' is held by another process ({holder})", .path.display())]
    LockHeld {
        /// Path of the contended lock file.
        path: PathBuf,
        /// Description of the current holder (pid and age, when readable).
        holder: String,
    },

    /// Lock-file I/O failed for a reason other than contention.
    #[error("lock operation failed: {0}")]
    Lock(String),

    /// The filesystem provider needs interactive credentials before it can
    /// serve calls. Recoverable: the caller collects credentials out of band
    /// and retries the whole mutation.
    #[error("filesystem provider requires interactive credentials")]
    CredentialsRequired,

    /// The config document could not be read.
    #[error("failed to read config document '{}': {message}", .path.display())]
    Read {
        /// Path of the target document.
        path: PathBuf,
        /// Underlying failure description.
        message: String,
    },

    /// The patched document could not be written back.
    #[error("failed to write config document '{}': {message}", .path.display())]
    Write {
        /// Path of the target document.
        path: PathBuf,
        /// Underlying failure description.
        message: String,
    },

    /// The managed block is corrupt (e.g. the sentinel marker appears more
    /// than once, which only manual editing can produce). Nothing is patched.
    #[error("config document is corrupt: {0}")]
    CorruptDocument(String),

    /// A rule was rejected at construction time.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// Settings could not be parsed or failed validation.
    #[error("{0}")]
    Settings(String),
}

/// Result type alias for patchlock operations.
pub type Result<T> = std::result::Result<T, PatchlockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_held_message_names_path_and_holder() {
        let err = PatchlockError::LockHeld {
            path: PathBuf::from("/tmp/config.lock"),
            holder: "pid 1234, held 3m".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/config.lock"));
        assert!(msg.contains("pid 1234"));
    }

    #[test]
    fn read_and_write_messages_name_the_document() {
        let err = PatchlockError::Read {
            path: PathBuf::from("wp-config.php"),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("wp-config.php"));
        assert!(err.to_string().contains("permission denied"));

        let err = PatchlockError::Write {
            path: PathBuf::from("wp-config.php"),
            message: "disk full".to_string(),
        };
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn credentials_required_message_mentions_credentials() {
        let msg = PatchlockError::CredentialsRequired.to_string();
        assert!(msg.contains("credentials"));
    }
}
