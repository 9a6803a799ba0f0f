//! Rule patching for config documents.
//!
//! A config document is opaque text except for one reserved **managed
//! block**: a run of directive lines sitting under a fixed sentinel comment
//! line. This module is the pure transform that adds directives to or
//! removes them from that block. No I/O and no locking happen here; the
//! orchestrator in [`crate::mutator`] owns both.
//!
//! The transform is line-based and idempotent: re-applying the same add or
//! remove any number of times yields the same document as applying it once,
//! and a directive is never duplicated.

mod patcher;
mod rules;

#[cfg(test)]
mod tests;

// Re-export public API
pub use patcher::{DEFAULT_OPENING_MARKER, DEFAULT_SENTINEL, Patcher};
pub use rules::{PatchMode, Rule, RuleOutcome, RuleSet};
