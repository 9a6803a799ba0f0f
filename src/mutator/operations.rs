//! The mutation state machine.

use super::store::{ConfigStore, StoreError};
use super::types::MutationReport;
use crate::error::{PatchlockError, Result};
use crate::lock::{LockFile, ProcessLiveness};
use crate::patch::{PatchMode, Patcher, RuleSet};
use crate::settings::Settings;

/// Orchestrates a config mutation: acquire lock, read, patch, write,
/// release.
///
/// Explicitly constructed from [`Settings`], a filesystem provider, and a
/// process-liveness provider; there is no ambient global instance. Each
/// [`mutate`](Self::mutate) call reads the document fresh and discards it
/// after the write; nothing is cached across calls.
#[derive(Debug)]
pub struct ConfigMutator<S, L> {
    settings: Settings,
    store: S,
    liveness: L,
    patcher: Patcher,
}

impl<S: ConfigStore, L: ProcessLiveness> ConfigMutator<S, L> {
    /// Build a mutator over the given providers. The patcher's document
    /// tokens come from the settings.
    pub fn new(settings: Settings, store: S, liveness: L) -> Self {
        let patcher = Patcher::new(settings.opening_marker.as_str(), settings.sentinel.as_str());
        Self {
            settings,
            store,
            liveness,
            patcher,
        }
    }

    /// The settings this mutator was constructed with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply `rules` to the target document under the lock.
    ///
    /// On lock denial nothing is read or written and no lock is released
    /// (none was held). After a successful acquisition the lock is released
    /// exactly once on every exit path: the RAII guard covers failure
    /// returns, and the success path releases explicitly so deletion
    /// failures surface.
    ///
    /// # Returns
    ///
    /// * `Ok(MutationReport)` - Per-rule outcomes, in rule order
    /// * `Err(PatchlockError::LockHeld)` - Another live process holds the lock
    /// * `Err(PatchlockError::CredentialsRequired)` - The provider needs
    ///   interactive credentials; retry the whole mutation once they exist
    /// * `Err(PatchlockError::Read | Write | CorruptDocument)` - Surfaced to
    ///   the caller without internal retry
    pub fn mutate(&self, rules: &RuleSet, mode: PatchMode) -> Result<MutationReport> {
        let lock = LockFile::new(&self.settings.lock_path);
        let guard = lock.acquire(&self.liveness)?;

        // Early returns drop the guard, which deletes the lock file.
        let report = self.mutate_locked(rules, mode)?;

        guard.release()?;
        Ok(report)
    }

    /// The read → patch → write section, entered only while the lock is held.
    fn mutate_locked(&self, rules: &RuleSet, mode: PatchMode) -> Result<MutationReport> {
        let path = &self.settings.config_path;

        if !self.store.exists(path) {
            return Err(PatchlockError::Read {
                path: path.clone(),
                message: "document does not exist".to_string(),
            });
        }

        let document = self.store.read(path).map_err(|e| match e {
            StoreError::CredentialsRequired => PatchlockError::CredentialsRequired,
            StoreError::Io(message) => PatchlockError::Read {
                path: path.clone(),
                message,
            },
        })?;

        let (patched, outcomes) = self.patcher.apply(&document, rules, mode)?;

        self.store.write(path, &patched).map_err(|e| match e {
            StoreError::CredentialsRequired => PatchlockError::CredentialsRequired,
            StoreError::Io(message) => PatchlockError::Write {
                path: path.clone(),
                message,
            },
        })?;

        Ok(MutationReport { outcomes })
    }
}
