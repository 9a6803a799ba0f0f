//! Process-liveness providers.
//!
//! Stale-lock reclamation needs to know whether the pid stored in an
//! existing lock file still denotes a live process. The query is
//! platform-specific, so it sits behind a small trait; the lock manager
//! takes whichever provider the caller constructs.

use crate::error::{PatchlockError, Result};
use chrono::{DateTime, Duration, Utc};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Query whether a process id denotes a currently live process.
pub trait ProcessLiveness {
    /// Returns true if `pid` is a live process.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Default liveness provider: probe the process table.
///
/// On Unix this sends signal 0 via `kill -0`, which checks existence without
/// delivering anything; on Windows it filters `tasklist` output by pid. Any
/// probe failure is reported as "not alive", which errs on the side of
/// reclaiming the lock.
///
/// Caveat: `kill -0` also exits non-zero on EPERM, so a live holder running
/// as a different user reads as dead and its lock gets reclaimed. All
/// holders of one lock are expected to run as the same account (the web
/// server's workers); deployments where that does not hold should use
/// [`HeartbeatFile`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProbe;

impl ProcessLiveness for SignalProbe {
    #[cfg(unix)]
    fn is_alive(&self, pid: u32) -> bool {
        Command::new("kill")
            .args(["-0", &pid.to_string()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[cfg(windows)]
    fn is_alive(&self, pid: u32) -> bool {
        Command::new("tasklist")
            .args(["/FI", &format!("PID eq {}", pid)])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map(|o| String::from_utf8_lossy(&o.stdout).contains(&pid.to_string()))
            .unwrap_or(false)
    }
}

/// Heartbeat-file liveness fallback.
///
/// For platforms where a process-table query is unavailable, a holder is
/// considered alive while its heartbeat file's modification time is younger
/// than the staleness threshold. The holder calls [`HeartbeatFile::beat`]
/// periodically; the pid argument to `is_alive` is ignored.
#[derive(Debug, Clone)]
pub struct HeartbeatFile {
    path: PathBuf,
    stale_after: Duration,
}

impl HeartbeatFile {
    /// Create a provider reading the heartbeat at `path`, treating a holder
    /// as dead once the heartbeat is `stale_minutes` old.
    pub fn new<P: Into<PathBuf>>(path: P, stale_minutes: u32) -> Self {
        Self {
            path: path.into(),
            stale_after: Duration::minutes(i64::from(stale_minutes)),
        }
    }

    /// Path of the heartbeat file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Refresh the heartbeat. Holders call this periodically while working.
    pub fn beat(&self) -> Result<()> {
        std::fs::write(&self.path, Utc::now().to_rfc3339()).map_err(|e| {
            PatchlockError::Lock(format!(
                "failed to write heartbeat '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Age of the heartbeat, or None if the file is missing or unreadable.
    fn age(&self) -> Option<Duration> {
        let modified = std::fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(Utc::now().signed_duration_since(DateTime::<Utc>::from(modified)))
    }
}

impl ProcessLiveness for HeartbeatFile {
    fn is_alive(&self, _pid: u32) -> bool {
        // No heartbeat at all means no live holder
        self.age().is_some_and(|age| age < self.stale_after)
    }
}
