//! Settings struct definition and defaults.

use crate::lock::HeartbeatFile;
use crate::patch::{DEFAULT_OPENING_MARKER, DEFAULT_SENTINEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a [`ConfigMutator`](crate::mutator::ConfigMutator).
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the target config document. Required.
    pub config_path: PathBuf,

    /// Path of the lock file serializing mutations of the document.
    /// Defaults to `config.lock` in the document's directory.
    #[serde(default)]
    pub lock_path: PathBuf,

    /// The document's opening marker line, after which a fresh managed
    /// block is established.
    #[serde(default = "default_opening_marker")]
    pub opening_marker: String,

    /// The sentinel comment line demarcating the managed block.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Staleness threshold in minutes for the heartbeat liveness fallback.
    #[serde(default = "default_heartbeat_stale_minutes")]
    pub heartbeat_stale_minutes: u32,
}

impl Settings {
    /// Create settings for `config_path` with every other field defaulted.
    pub fn new<P: Into<PathBuf>>(config_path: P) -> Self {
        let config_path = config_path.into();
        let lock_path = default_lock_path(&config_path);
        Self {
            config_path,
            lock_path,
            opening_marker: default_opening_marker(),
            sentinel: default_sentinel(),
            heartbeat_stale_minutes: default_heartbeat_stale_minutes(),
        }
    }

    /// Override the lock file path.
    pub fn with_lock_path<P: Into<PathBuf>>(mut self, lock_path: P) -> Self {
        self.lock_path = lock_path.into();
        self
    }

    /// Build the heartbeat liveness fallback for this configuration, for
    /// platforms without a usable process table. The heartbeat file sits
    /// next to the lock file.
    pub fn heartbeat_liveness(&self) -> HeartbeatFile {
        HeartbeatFile::new(
            self.lock_path.with_extension("heartbeat"),
            self.heartbeat_stale_minutes,
        )
    }
}

pub(super) fn default_lock_path(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or(Path::new("."))
        .join("config.lock")
}

fn default_opening_marker() -> String {
    DEFAULT_OPENING_MARKER.to_string()
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

fn default_heartbeat_stale_minutes() -> u32 {
    30
}
