//! state_dir resolution
//!
//! The state dir holds `config.toml`, `prefs.toml` and the log file.
//! Resolution priority:
//! 1. --state-dir <path> flag (must exist)
//! 2. $COMPILAB_HOME
//! 3. <platform config dir>/compilab
//! 4. Current directory "."

use crate::cli::{Error, Result};
use std::path::{Path, PathBuf};

/// Env var naming the state dir
pub const STATE_DIR_ENV: &str = "COMPILAB_HOME";

/// Resolve the state dir from the flag, then the environment
pub fn resolve_state_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_with(
        explicit,
        std::env::var_os(STATE_DIR_ENV).map(PathBuf::from),
        dirs::config_dir(),
    )
}

fn resolve_with(
    explicit: Option<PathBuf>,
    env_home: Option<PathBuf>,
    platform_config: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            return Err(Error::InvalidArgs(format!(
                "state dir '{}' does not exist",
                path.display()
            )));
        }
        return Ok(path);
    }

    if let Some(home) = env_home.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(home);
    }

    if let Some(config) = platform_config {
        return Ok(config.join("compilab"));
    }

    Ok(PathBuf::from("."))
}

/// Create the state dir if needed
pub fn ensure_state_dir(state_dir: &Path) -> Result<()> {
    if !state_dir.exists() {
        std::fs::create_dir_all(state_dir)?;
        tracing::debug!(path = %state_dir.display(), "state dir created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_explicit_state_dir() {
        let temp_dir = TempDir::new().unwrap();
        let resolved = resolve_with(
            Some(temp_dir.path().to_path_buf()),
            Some(PathBuf::from("/env/home")),
            None,
        )
        .unwrap();
        assert_eq!(resolved, temp_dir.path());
    }

    #[test]
    fn test_resolve_explicit_nonexistent_fails() {
        let result = resolve_with(Some(PathBuf::from("/nonexistent/path/12345")), None, None);
        assert!(matches!(result, Err(Error::InvalidArgs(_))));
    }

    #[test]
    fn test_resolve_env_over_platform() {
        let resolved = resolve_with(
            None,
            Some(PathBuf::from("/env/home")),
            Some(PathBuf::from("/home/u/.config")),
        )
        .unwrap();
        assert_eq!(resolved, PathBuf::from("/env/home"));
    }

    #[test]
    fn test_resolve_platform_default() {
        let resolved = resolve_with(None, None, Some(PathBuf::from("/home/u/.config"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/home/u/.config/compilab"));
    }

    #[test]
    fn test_resolve_falls_back_to_current() {
        assert_eq!(resolve_with(None, None, None).unwrap(), PathBuf::from("."));
    }

    #[test]
    fn test_ensure_state_dir_creates() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        ensure_state_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
