//! Patchlock: lock-guarded idempotent directive patching for shared
//! bootstrap config files.
//!
//! Multiple OS processes handling independent requests may all decide to add
//! or remove directive lines in one shared config document (the motivating
//! case: security directives in a PHP bootstrap file). This crate serializes
//! those mutations through a pid-stamped lock file and applies them with an
//! idempotent line-based patch algorithm that never duplicates a directive.
//!
//! Three pieces, leaves first:
//!
//! - [`lock`] — filesystem-resident mutual exclusion with stale-lock
//!   reclamation via pluggable process-liveness probing.
//! - [`patch`] — the pure text transform over the document's managed block.
//! - [`mutator`] — the orchestrator: acquire lock, read the document through
//!   an injected filesystem provider, patch, write back, release on every
//!   exit path.
//!
//! ```no_run
//! use patchlock::{ConfigMutator, LocalStore, PatchMode, Rule, RuleSet, Settings, SignalProbe};
//!
//! let settings = Settings::new("/var/www/wp-config.php");
//! let mutator = ConfigMutator::new(settings, LocalStore, SignalProbe);
//!
//! let rules = RuleSet::single(Rule::new("define('DISALLOW_FILE_EDIT', true);")?);
//! let report = mutator.mutate(&rules, PatchMode::Add)?;
//! assert!(report.changed() || report.is_noop());
//! # Ok::<(), patchlock::PatchlockError>(())
//! ```

pub mod error;
pub mod fs;
pub mod lock;
pub mod mutator;
pub mod patch;
pub mod settings;

pub use error::{PatchlockError, Result};
pub use lock::{HeartbeatFile, LockFile, LockGuard, LockHolder, ProcessLiveness, SignalProbe};
pub use mutator::{ConfigMutator, ConfigStore, LocalStore, MutationReport, StoreError};
pub use patch::{PatchMode, Patcher, Rule, RuleOutcome, RuleSet};
pub use settings::Settings;
