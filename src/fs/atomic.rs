//! Atomic file replacement.
//!
//! Strategy: write the content to a dot-prefixed temporary file in the
//! target's directory, fsync it, then rename it over the target. On POSIX
//! `rename()` is atomic when source and destination share a filesystem; on
//! Windows an existing target is removed first, which narrows but does not
//! close the non-atomic window. On crash a `.{filename}.tmp` file may remain.

use crate::error::{PatchlockError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace the file at `path` with `content`.
///
/// The target is either fully replaced or left untouched; readers never
/// observe a partially written document.
pub fn atomic_write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let write_err = |message: String| PatchlockError::Write {
        path: path.to_path_buf(),
        message,
    };

    let temp_path = temp_path_for(path).ok_or_else(|| write_err("invalid file path".to_string()))?;

    write_and_sync(&temp_path, content).map_err(|e| write_err(e.to_string()))?;

    replace(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        write_err(e.to_string())
    })
}

/// Temp file path in the same directory as the target (`.{filename}.tmp`).
fn temp_path_for(target: &Path) -> Option<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target.file_name()?.to_str()?;
    Some(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    let written = file
        .write_all(content.as_bytes())
        .and_then(|()| file.sync_all());
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

#[cfg(unix)]
fn replace(source: &Path, target: &Path) -> std::io::Result<()> {
    // rename() replaces an existing destination atomically
    fs::rename(source, target)?;

    // Persist the directory entry as well
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(windows)]
fn replace(source: &Path, target: &Path) -> std::io::Result<()> {
    // rename() fails on an existing destination; clear it first
    if target.exists() {
        fs::remove_file(target)?;
    }
    fs::rename(source, target)
}
