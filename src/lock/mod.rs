//! Locking subsystem for patchlock.
//!
//! Config mutations from concurrent OS processes are serialized through a
//! single filesystem-resident lock file whose sole content is the holder's
//! process id as decimal text.
//!
//! # Acquisition
//!
//! Lock files are created with **create_new** semantics (exclusive create),
//! so the existence check and the pid write are one atomic operation and two
//! racing processes can never both believe they acquired the lock.
//! Acquisition is a single non-blocking attempt: a denied caller gets
//! [`PatchlockError::LockHeld`](crate::error::PatchlockError::LockHeld) and
//! implements its own backoff if it wants to retry.
//!
//! # Stale locks
//!
//! A holder that crashed between acquire and release would wedge the shared
//! document forever, so an existing lock whose stored pid no longer denotes
//! a live process (per the injected [`ProcessLiveness`] provider) is
//! reclaimed by the next acquirer.
//!
//! # RAII Guards
//!
//! Acquisition returns a guard that deletes the lock file when dropped. If
//! deletion fails during drop, a warning is printed but the program does not
//! crash.

mod guard;
mod liveness;
mod manager;


// Re-export public API
pub use guard::LockGuard;
pub use liveness::{HeartbeatFile, ProcessLiveness, SignalProbe};
pub use manager::{LockFile, LockHolder};
