//! Application configuration loaded from `config.toml`.
//!
//! ```toml
//! [storage]
//! dir = "/var/lib/sanskriti"
//!
//! [logging]
//! level = "debug"
//! file = true
//!
//! [auth]
//! google_web_client_id = "1234.apps.googleusercontent.com"
//! platform = "web"
//! ```
//!
//! A missing or empty file yields [`AppConfig::default`].

use crate::paths::{PathError, SanskritiPaths};
use crate::storage::{AtomicFile, AtomicFileError};
use sanskriti_core::identity::SocialPlatform;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding `auth.google_web_client_id`.
pub const GOOGLE_WEB_CLIENT_ID_ENV: &str = "GOOGLE_WEB_CLIENT_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot resolve config path: {0}")]
    Path(#[from] PathError),

    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: AtomicFileError,
    },

    #[error("Failed to write config {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: AtomicFileError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `storage.json`. Platform data dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `SANSKRITI_LOG` is not set.
    pub level: String,
    /// Also write daily-rolling log files.
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_web_client_id: Option<String>,
    pub platform: SocialPlatform,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub auth: AuthSettings,
}

impl AppConfig {
    /// Loads the config file at `path`, falling back to defaults when it is
    /// missing, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = AtomicFile::<AppConfig>::toml(path.to_path_buf())
            .load()
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .unwrap_or_default();

        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Loads `config.toml` from its platform location.
    pub fn load_default(paths: &SanskritiPaths) -> Result<Self, ConfigError> {
        Self::load(&paths.config_file()?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        AtomicFile::<AppConfig>::toml(path.to_path_buf())
            .save(self)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Applies overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(client_id) = lookup(GOOGLE_WEB_CLIENT_ID_ENV).filter(|v| !v.trim().is_empty()) {
            self.auth.google_web_client_id = Some(client_id);
        }
        self
    }

    /// The paths to use, honouring `storage.dir`.
    pub fn resolve_paths(&self, base_dir: Option<PathBuf>) -> SanskritiPaths {
        SanskritiPaths::new(base_dir.or_else(|| self.storage.dir.clone()))
    }
}
