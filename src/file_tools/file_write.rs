//! file_write: atomic overwrite, and the `resultado.txt` export
//!
//! Writes go to a sibling temp file, are fsynced, then renamed over the
//! target. Fails if the parent directory does not exist.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed name of the exported result file
pub const OUTPUT_FILE_NAME: &str = "resultado.txt";

/// Errors that can occur during file write operations
#[derive(Error, Debug)]
pub enum FileWriteError {
    #[error("Parent directory does not exist: {0}")]
    ParentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file write operations
pub type Result<T> = std::result::Result<T, FileWriteError>;

/// Atomically write content to a file
///
/// 1. Write to a temporary file next to the target
/// 2. fsync
/// 3. Rename over the target (atomic on POSIX)
pub fn file_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(FileWriteError::ParentNotFound(parent.display().to_string()));
        }
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Export rendered output as `<dir>/resultado.txt`
///
/// Always allowed, whatever the mode or outcome; an empty document writes an
/// empty file. Returns the written path.
pub fn write_output(dir: &Path, text: &str) -> Result<PathBuf> {
    let path = dir.join(OUTPUT_FILE_NAME);
    file_write(&path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "output saved");
    Ok(path)
}
