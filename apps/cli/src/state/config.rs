//! # Configuration State
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MARQUEE_*`)
//! 2. Config file (`marquee.toml`, or the path given with `--config`)
//! 3. Defaults (this file)
//!
//! ## Example `marquee.toml`
//! ```toml
//! [remote]
//! base_url = "https://673ccf6796b8dcd5f3fbc68e.mockapi.io"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/tmp/marquee.db"
//!
//! [log]
//! filter = "info,marquee=debug"
//! ```
//!
//! Configuration is read-only after loading, so no lock is needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use marquee_remote::RemoteConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "marquee.toml";

/// File name of the SQLite database in the platform data directory.
pub const DATABASE_FILE_NAME: &str = "marquee.db";

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_API_URL: &str = "MARQUEE_API_URL";
pub const ENV_DB_PATH: &str = "MARQUEE_DB_PATH";
pub const ENV_LOG: &str = "MARQUEE_LOG";
pub const ENV_TIMEOUT_SECS: &str = "MARQUEE_TIMEOUT_SECS";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// REST service settings
    pub remote: RemoteConfig,

    /// Durable storage settings
    pub storage: StorageConfig,

    /// Logging settings
    pub log: LogConfig,
}

/// Where the personal list is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Pool size
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: None,
            max_connections: 4,
        }
    }
}

impl StorageConfig {
    /// Configured path, or `<data dir>/marquee.db`.
    pub fn resolved_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| AppError::config("Could not determine app data directory"))
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "info,sqlx=warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file and process environment.
    ///
    /// An explicit `path` must exist. Without one, `marquee.toml` in the
    /// platform config directory is used when present.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let mut config = match file {
            Some(p) => Self::from_file(&p)?,
            None => AppConfig::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`AppConfig::load`], but falls back to defaults (plus environment)
    /// on failure.
    ///
    /// The load error is handed back so the caller can log it once the
    /// subscriber is installed.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<AppError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(err) => {
                let mut fallback = AppConfig::default();
                // A bad environment value fails again here; keep plain defaults then.
                if fallback.apply_env(|key| std::env::var(key).ok()).is_err()
                    || fallback.validate().is_err()
                {
                    fallback = AppConfig::default();
                }
                (fallback, Some(err))
            }
        }
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e.message)))
    }

    /// Parses TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> AppResult<Self> {
        toml::from_str(text).map_err(|e| AppError::config(format!("Invalid TOML: {}", e)))
    }

    /// Applies `MARQUEE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.remote.base_url = url;
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.storage.database_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log.filter = filter;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.remote.timeout_secs = secs.trim().parse().map_err(|_| {
                AppError::config(format!("{} must be a whole number, got {:?}", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        Ok(())
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> AppResult<()> {
        self.remote.validate()?;

        if self.storage.max_connections == 0 {
            return Err(AppError::config("storage.max_connections must be at least 1"));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "marquee", "marquee")
}

/// `<config dir>/marquee.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
