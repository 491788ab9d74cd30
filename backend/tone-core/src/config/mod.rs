pub mod env;
pub mod paths;

pub use env::EnvDefaults;
pub use paths::AppPaths;

use crate::error::config::ConfigError;
use crate::{DEFAULT_MODEL, MISTRAL_CHAT_COMPLETIONS_URL};

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "tonecraft.toml";
const CONFIG_VERSION: u32 = 1;

/// Hard upper bound on a single completion round trip.
pub const MAX_REQUEST_TIMEOUT_MS: u64 = 30_000;

const DEFAULT_INITIAL_TEXT: &str = "Hey there, awesome folks!\n\nGuess what's about to make a splash? Project Gemini, our super cool new dev adventure, is ready to take off! So, grab some snacks, 'cause we're just 30 days away from the big party!";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiPreferences {
    #[serde(default = "default_initial_text")]
    pub initial_text: String,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            initial_text: default_initial_text(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiPreferences,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ApiConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    MISTRAL_CHAT_COMPLETIONS_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_request_timeout_ms() -> u64 {
    MAX_REQUEST_TIMEOUT_MS
}
fn default_initial_text() -> String {
    DEFAULT_INITIAL_TEXT.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl AppConfig {
    /// Load config from {config_dir}/tonecraft.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Load config, writing the defaults first when no file exists yet.
    ///
    /// A failed first write is logged and the defaults are still returned;
    /// an existing but invalid file is an error as in [`AppConfig::load`].
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        if config_dir.join(CONFIG_FILE_NAME).exists() {
            return Self::load(config_dir);
        }

        let config = Self::default();
        if let Err(e) = config.save(config_dir) {
            warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Save config to {config_dir}/tonecraft.toml using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation,
    /// serialization, write, or rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, contents).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename (POSIX guarantees atomicity)
        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply environment defaults on top of the file values.
    ///
    /// Only the model is overridable this way; the credential is handed to
    /// the credential store separately so it never lands in `AppConfig`.
    pub fn with_env(mut self, env: &EnvDefaults) -> Self {
        if let Some(model) = env.model.as_deref() {
            self.api.default_model = model.to_string();
        }
        self
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if self.api.request_timeout_ms == 0 || self.api.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid request timeout: {}ms (must be 1-{})",
                    self.api.request_timeout_ms, MAX_REQUEST_TIMEOUT_MS
                ),
            });
        }

        if self.api.default_model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "default_model cannot be empty".to_string(),
            });
        }

        match url::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::from(Location::caller()),
                    reason: format!("Invalid base URL: {}", self.api.base_url),
                });
            }
        }

        Ok(())
    }
}
