//! Config mutation orchestration.
//!
//! [`ConfigMutator`] composes the locking subsystem, the injected filesystem
//! provider, and the rule patcher into one operation: acquire the lock, read
//! the document fresh, patch it, write it back, release the lock. The lock
//! is released on every exit path after acquisition, including failures, so
//! a failed mutation can never wedge the shared document.

mod operations;
mod store;
mod types;


// Re-export public API
pub use operations::ConfigMutator;
pub use store::{ConfigStore, LocalStore, StoreError};
pub use types::MutationReport;
