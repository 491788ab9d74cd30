use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Failures of a [`PreferenceStore`](crate::persistence::PreferenceStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store Read Error: {path}: {source} {location}")]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store Write Error: {path}: {source} {location}")]
    Write {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store Parse Error: {path}: {reason} {location}")]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Store Serialization Error: {reason} {location}")]
    Serialize {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Store Lock Error: {reason} {location}")]
    Poisoned {
        location: ErrorLocation,
        reason: String,
    },
}
