//! Logging setup
//!
//! The terminal UI owns stdout, so logs go to a file in the state dir
//! through a non-blocking writer. `RUST_LOG` wins over `logging.level`.

use crate::config::LoggingConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log path: {0}")]
    InvalidPath(String),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global subscriber
///
/// Keep the returned guard alive until exit, or buffered lines are lost.
pub fn init(config: &LoggingConfig, log_path: &Path) -> Result<WorkerGuard, LoggingError> {
    let (dir, file_name) = split_log_path(log_path)?;
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.display().to_string(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(path = %log_path.display(), "logging initialised");
    Ok(guard)
}

fn split_log_path(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.display().to_string()))?
        .to_string();
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name))
}
