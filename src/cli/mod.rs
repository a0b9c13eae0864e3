//! CLI module
//!
//! Provides:
//! - Argument parsing (clap)
//! - state_dir resolution (flag → env → platform config dir → cwd)
//! - Headless command dispatch (analyze, examples)

pub mod args;
pub mod dispatch;
pub mod state_dir;

// Re-exports
pub use args::{parse_args, Args, Command};
pub use dispatch::{run_cli_mode, ExitCode, SourceSpec};
pub use state_dir::{ensure_state_dir, resolve_state_dir};

use crate::client::TransportError;
use crate::config::ConfigError;
use crate::file_tools::{FileReadError, FileWriteError};
use crate::workbench::WorkbenchError;
use compilab_core::ExampleError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Example(#[from] ExampleError),

    #[error("Cannot read source: {0}")]
    FileRead(#[from] FileReadError),

    #[error("Cannot save output: {0}")]
    FileWrite(#[from] FileWriteError),

    #[error("Cannot create HTTP client: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Workbench(#[from] WorkbenchError),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
