use common::ErrorLocation;

use std::fmt::Display;
use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the application shell.
///
/// Serializable so `--json` one-shot runs can report failures in the same
/// shape as results.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum TonecraftError {
    /// Error from this App
    #[error("Tonecraft Error: {message} {location}")]
    Tonecraft {
        message: String,
        location: ErrorLocation,
    },

    /// Error from tone-core (config, persistence, adjustment)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Terminal or file I/O failed
    #[error("IO Error: {message} {location}")]
    Io {
        message: String,
        location: ErrorLocation,
    },
}

impl TonecraftError {
    #[track_caller]
    pub fn core(error: impl Display) -> Self {
        TonecraftError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(error: impl Display) -> Self {
        TonecraftError::Io {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
