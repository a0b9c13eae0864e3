//! File tools: loading source files and exporting results
//!
//! All operations use the real filesystem.

mod file_read;
mod file_write;

pub use file_read::{file_read, stdin_read, FileReadError};
pub use file_write::{file_write, write_output, FileWriteError, OUTPUT_FILE_NAME};
