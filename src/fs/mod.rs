//! Filesystem utilities for patchlock.
//!
//! Provides the atomic write used when the patched config document is
//! written back, so a crash mid-write never leaves a truncated file.

mod atomic;

pub use atomic::atomic_write_text;
