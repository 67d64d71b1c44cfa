//! Unified path management for SanskritiAR files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/sanskriti/         # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/sanskriti/    # Data directory
//! ├── storage.json             # Key-value store (identity, favorites, theme)
//! └── logs/                    # Application logs
//!     └── sanskriti.log.YYYY-MM-DD
//! ```
//!
//! With a base directory override everything lives directly under that
//! directory instead.

use std::path::PathBuf;

const APP_DIR: &str = "sanskriti";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where configuration, storage and logs live.
#[derive(Debug, Clone, Default)]
pub struct SanskritiPaths {
    base_dir: Option<PathBuf>,
}

impl SanskritiPaths {
    /// Creates a resolver. `base_dir` replaces every platform directory.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage.json"))
    }

    pub fn log_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = SanskritiPaths::new(Some(PathBuf::from("/tmp/sanskriti-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/sanskriti-test/config.toml")
        );
        assert_eq!(
            paths.storage_file().unwrap(),
            PathBuf::from("/tmp/sanskriti-test/storage.json")
        );
        assert_eq!(
            paths.log_dir().unwrap(),
            PathBuf::from("/tmp/sanskriti-test/logs")
        );
    }

    #[test]
    fn test_platform_dirs_are_namespaced() {
        let paths = SanskritiPaths::default();
        if let Ok(dir) = paths.config_dir() {
            assert!(dir.ends_with("sanskriti"));
        }
    }
}
