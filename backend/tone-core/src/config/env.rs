//! Deploy-time defaults from the environment and `.env` files.
//!
//! # Variables
//! - `MISTRAL_API_KEY`: credential used in place of a persisted one
//! - `MISTRAL_MODEL`: default model name
//!
//! The credential is wrapped in [`Credential`] as soon as it is read, so it
//! never shows up in `Debug` output of this struct.

use common::Credential;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";
pub const MODEL_ENV: &str = "MISTRAL_MODEL";

#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub api_key: Option<Credential>,
    pub model: Option<String>,
    /// Path of the `.env` file that was loaded, if any.
    pub dotenv_path: Option<PathBuf>,
}

impl EnvDefaults {
    /// Load `.env` (if present) and read the variables.
    pub fn load() -> Self {
        let dotenv_path = try_load_dotenv();
        if dotenv_path.is_none() {
            debug!("No .env file found - will check existing environment variables");
        }

        Self {
            api_key: read_var(API_KEY_ENV)
                .map(Credential::new)
                .filter(Credential::is_present),
            model: read_var(MODEL_ENV).filter(|m| !m.trim().is_empty()),
            dotenv_path,
        }
    }
}

fn read_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Env var {} contains invalid unicode, ignoring", name);
            None
        }
    }
}

/// Attempts to load .env from known locations.
fn try_load_dotenv() -> Option<PathBuf> {
    // Try current directory first
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    // Try executable directory
    let exe_dir = env::current_exe().ok()?.parent()?.to_path_buf();
    let env_path = exe_dir.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {:?}", env_path);
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {:?}: {}", env_path, e);
            None
        }
    }
}
