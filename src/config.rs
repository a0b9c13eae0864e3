//! Client configuration
//!
//! Read from `<state_dir>/config.toml`. Every key is optional; a missing file
//! means defaults. `$COMPILAB_BACKEND` and `--backend` override the backend
//! URL, in that order of increasing priority.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name inside the state dir
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Env var overriding `backend.url`
pub const BACKEND_ENV: &str = "COMPILAB_BACKEND";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FILE: &str = "compilab.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid backend URL '{0}': must start with http:// or https://")]
    InvalidBackendUrl(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(u64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Log file, relative to the state dir
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Parse TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    /// Load `<state_dir>/config.toml`, or defaults when absent
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text, &path)
    }

    /// Load, apply env and flag overrides, validate
    pub fn resolve(state_dir: &Path, backend_flag: Option<String>) -> Result<Self> {
        let mut config = Self::load(state_dir)?;
        let env_backend = std::env::var(BACKEND_ENV).ok().filter(|v| !v.trim().is_empty());
        config.apply_overrides(env_backend, backend_flag);
        config.validate()?;
        Ok(config)
    }

    /// Later arguments win
    pub fn apply_overrides(&mut self, env_backend: Option<String>, backend_flag: Option<String>) {
        if let Some(url) = backend_flag.or(env_backend) {
            self.backend.url = url;
        }
        self.backend.url = self.backend.url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.backend.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(url.clone()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(self.backend.timeout_secs));
        }
        Ok(())
    }

    /// Absolute log file path
    pub fn log_path(&self, state_dir: &Path) -> PathBuf {
        if self.logging.file.is_absolute() {
            self.logging.file.clone()
        } else {
            state_dir.join(&self.logging.file)
        }
    }
}
