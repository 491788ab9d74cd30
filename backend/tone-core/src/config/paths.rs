//! Platform-aware detection of Tonecraft's config and log directories.
//!
//! Lookup order:
//! 1. Explicit override (CLI flag)
//! 2. TONECRAFT_CONFIG_DIR environment variable
//! 3. Platform-specific directories via `dirs` crate

use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub const CONFIG_DIR_ENV: &str = "TONECRAFT_CONFIG_DIR";
const APP_DIR_NAME: &str = "tonecraft";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Holds `tonecraft.toml` and `preferences.json`.
    pub config_dir: PathBuf,
    /// Holds `tonecraft.log`.
    pub log_dir: PathBuf,
    pub source: PathSource,
}

/// How the paths were determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    Override,
    EnvVar,
    PlatformDefault,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::Override => write!(f, "command line"),
            PathSource::EnvVar => write!(f, "{CONFIG_DIR_ENV}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
        }
    }
}

impl AppPaths {
    /// Resolve directories.
    ///
    /// An override (or the env var) puts logs under `{dir}/logs`; otherwise
    /// config goes to the platform config dir and logs to the platform data dir.
    ///
    /// # Errors
    /// Returns `ConfigError::DirectoryNotFound` if no platform directory can be determined.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(dir) = override_dir {
            info!("Using config dir override: {:?}", dir);
            return Ok(Self::rooted_at(dir.to_path_buf(), PathSource::Override));
        }

        if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV) {
            if !custom_dir.trim().is_empty() {
                info!("Using {} override: {:?}", CONFIG_DIR_ENV, custom_dir);
                return Ok(Self::rooted_at(PathBuf::from(custom_dir), PathSource::EnvVar));
            }
        }

        let config_dir = dirs::config_dir().map(|d| d.join(APP_DIR_NAME));
        let log_dir = dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join(LOG_DIR_NAME));

        match (config_dir, log_dir) {
            (Some(config_dir), Some(log_dir)) => {
                debug!("Platform config dir: {:?}, log dir: {:?}", config_dir, log_dir);
                Ok(Self {
                    config_dir,
                    log_dir,
                    source: PathSource::PlatformDefault,
                })
            }
            _ => Err(ConfigError::DirectoryNotFound {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Cannot determine config directory. Set {CONFIG_DIR_ENV} or pass --config-dir."
                ),
            }),
        }
    }

    fn rooted_at(dir: PathBuf, source: PathSource) -> Self {
        Self {
            log_dir: dir.join(LOG_DIR_NAME),
            config_dir: dir,
            source,
        }
    }
}
