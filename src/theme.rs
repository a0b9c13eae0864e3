//! Theme preference
//!
//! A single value, `light` or `dark`, persisted under the key `theme` in
//! `<state_dir>/prefs.toml`. Read once at startup, written on every toggle.

use crate::file_tools::{file_write, FileWriteError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PREFS_FILE_NAME: &str = "prefs.toml";

/// Transient confirmation shown after a toggle
pub const THEME_CHANGED_TOAST: &str = "¡Tema cambiado!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Failed to write preferences: {0}")]
    Write(#[from] FileWriteError),
}

pub type Result<T> = std::result::Result<T, ThemeError>;

/// On-disk shape of `prefs.toml`; unknown values are kept as strings
#[derive(Debug, Default, Serialize, Deserialize)]
struct Prefs {
    theme: Option<String>,
}

/// Reads and writes the theme preference
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(PREFS_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme; anything missing or unreadable gives `Dark`
    pub fn load(&self) -> Theme {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Theme::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read prefs");
                return Theme::default();
            }
        };

        let prefs: Prefs = match toml::from_str(&text) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "invalid prefs file");
                return Theme::default();
            }
        };

        match prefs.theme.as_deref() {
            None => Theme::default(),
            Some(value) => Theme::parse(value).unwrap_or_else(|| {
                tracing::warn!(value, "unknown theme value; using dark");
                Theme::default()
            }),
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| ThemeError::CreateDir {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }
        let prefs = Prefs {
            theme: Some(theme.as_str().to_string()),
        };
        let text = toml::to_string(&prefs)?;
        file_write(&self.path, &text)?;
        tracing::debug!(theme = %theme, path = %self.path.display(), "theme saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_is_dark() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PREFS_FILE_NAME), "theme = \"sepia\"\n").unwrap();
        assert_eq!(ThemeStore::new(dir.path()).load(), Theme::Dark);
    }

    #[test]
    fn test_missing_key_is_dark() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PREFS_FILE_NAME), "").unwrap();
        assert_eq!(ThemeStore::new(dir.path()).load(), Theme::Dark);
    }

    #[test]
    fn test_save_writes_fixed_key() {
        let dir = TempDir::new().unwrap();
        let store = ThemeStore::new(dir.path());
        store.save(Theme::Light).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.trim(), "theme = \"light\"");
    }
}
