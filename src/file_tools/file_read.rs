//! file_read: load a source file into the input buffer
//!
//! No size or encoding validation. Invalid UTF-8 is decoded lossily, so a
//! binary file produces garbled but usable text rather than an error.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during file read operations
#[derive(Error, Debug)]
pub enum FileReadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for file read operations
pub type Result<T> = std::result::Result<T, FileReadError>;

/// Read an entire file as text
///
/// # Examples
/// ```ignore
/// use compilab::file_tools::file_read;
/// use std::path::Path;
///
/// let code = file_read(Path::new("program.asm"))?;
/// ```
pub fn file_read(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FileReadError::NotFound(path.display().to_string()));
    }
    if path.is_dir() {
        return Err(FileReadError::NotAFile(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), "file is not valid UTF-8; decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    tracing::debug!(path = %path.display(), bytes = content.len(), "file read");
    Ok(content)
}

/// Read all of stdin as text, lossily
pub fn stdin_read() -> Result<String> {
    use std::io::Read;

    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
