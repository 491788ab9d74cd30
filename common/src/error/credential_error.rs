use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a [`Credential`](crate::Credential) is asked to leave the process
/// through a channel other than the completion request.
#[derive(Debug, ThisError)]
pub enum CredentialError {
    #[error("Credential Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
