//! Lock acquisition and holder inspection.

use super::guard::LockGuard;
use super::liveness::ProcessLiveness;
use crate::error::{PatchlockError, Result};
use chrono::{DateTime, Duration, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Attempts at the exclusive create before conceding the lock to a
/// concurrent acquirer racing us through stale reclamation.
const RECLAIM_ATTEMPTS: u32 = 3;

/// A named, filesystem-resident mutual-exclusion token.
///
/// The file's sole content is the holder's process id as decimal text. The
/// lock is held iff the file exists and that pid denotes a live process; a
/// dead holder's lock is stale and silently reclaimed by the next acquirer.
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
}

/// Diagnostic view of an existing lock file, for contention messages.
#[derive(Debug, Clone)]
pub struct LockHolder {
    /// The stored process id, when the file content parses as one.
    pub pid: Option<u32>,

    /// When the lock file was last written, per its mtime.
    pub held_since: Option<DateTime<Utc>>,
}

impl LockFile {
    /// Create a handle for the lock file at `path`. No I/O happens here.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the lock with a single non-blocking attempt.
    ///
    /// The lock file is created exclusively and the caller's pid written
    /// into it. If the file already exists, the stored pid is probed through
    /// `liveness`: a live holder means denial (the existing file is left
    /// untouched), a dead or unreadable holder means the lock is stale and
    /// gets reclaimed.
    ///
    /// Callers that need the lock must implement their own backoff; this
    /// function never waits.
    ///
    /// # Returns
    ///
    /// * `Ok(LockGuard)` - Successfully acquired lock with RAII guard
    /// * `Err(PatchlockError::LockHeld)` - Another live process holds it
    /// * `Err(PatchlockError::Lock)` - Lock-file I/O failed
    pub fn acquire(&self, liveness: &dyn ProcessLiveness) -> Result<LockGuard> {
        self.ensure_parent_dir()?;

        for _ in 0..RECLAIM_ATTEMPTS {
            match self.try_create() {
                Ok(guard) => return Ok(guard),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    let holder = self.holder();
                    if let Some(pid) = holder.as_ref().and_then(|h| h.pid)
                        && liveness.is_alive(pid)
                    {
                        return Err(PatchlockError::LockHeld {
                            path: self.path.clone(),
                            holder: holder
                                .map(|h| h.to_string())
                                .unwrap_or_else(|| "unknown holder".to_string()),
                        });
                    }

                    // Stale (dead pid) or garbage content: reclaim and retry
                    // the exclusive create so a racing reclaimer cannot make
                    // both of us believe we hold the lock.
                    match fs::remove_file(&self.path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => {
                            return Err(PatchlockError::Lock(format!(
                                "failed to reclaim stale lock '{}': {}",
                                self.path.display(),
                                e
                            )));
                        }
                    }
                }
                Err(e) => {
                    return Err(PatchlockError::Lock(format!(
                        "failed to acquire lock '{}': {}",
                        self.path.display(),
                        e
                    )));
                }
            }
        }

        // Someone else kept winning the reclamation race
        Err(PatchlockError::LockHeld {
            path: self.path.clone(),
            holder: "contended during stale reclamation".to_string(),
        })
    }

    /// Read the current holder of an existing lock file, if any.
    pub fn holder(&self) -> Option<LockHolder> {
        let content = fs::read_to_string(&self.path).ok()?;
        let held_since = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        Some(LockHolder {
            pid: content.trim().parse().ok(),
            held_since,
        })
    }

    /// Exclusively create the lock file and write the caller's pid.
    fn try_create(&self) -> std::io::Result<LockGuard> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;

        let written = file
            .write_all(std::process::id().to_string().as_bytes())
            .and_then(|()| file.sync_all());

        if let Err(e) = written {
            // Never leave behind a lock file we failed to stamp
            let _ = fs::remove_file(&self.path);
            return Err(e);
        }

        Ok(LockGuard::new(self.path.clone()))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                PatchlockError::Lock(format!(
                    "failed to create lock directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl LockHolder {
    /// Age of the lock, when the file's mtime was readable.
    pub fn age(&self) -> Option<Duration> {
        self.held_since
            .map(|since| Utc::now().signed_duration_since(since))
    }

    /// Format the age as a human-readable string.
    pub fn age_string(&self) -> String {
        let Some(age) = self.age() else {
            return "unknown age".to_string();
        };

        let minutes = age.num_minutes();
        let hours = age.num_hours();
        let days = age.num_days();

        if days > 0 {
            format!("{}d {}h", days, hours % 24)
        } else if hours > 0 {
            format!("{}h {}m", hours, minutes % 60)
        } else {
            format!("{}m", minutes)
        }
    }
}

impl std::fmt::Display for LockHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pid {
            Some(pid) => write!(f, "pid {}, held {}", pid, self.age_string()),
            None => write!(f, "unreadable pid, held {}", self.age_string()),
        }
    }
}
