//! Error types for tone adjustment.
//!
//! Key design decisions:
//! - Every failure path of a round trip ends up as one of these variants
//! - HTTP status codes stored directly (not parsed from strings)
//! - `user_message()` is the stable, displayable text; `Display` adds location
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use thiserror::Error as ThisError;

pub const NO_API_KEY_MESSAGE: &str = "API key is required to use this service";
pub const NO_TEXT_MESSAGE: &str = "Please enter some text to adjust";
pub const API_REQUEST_FAILED_MESSAGE: &str = "Failed to adjust tone. Please try again.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Received invalid response from the AI service";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const TIMEOUT_ERROR_MESSAGE: &str = "Request timed out. Please try again.";
pub const BUSY_MESSAGE: &str = "A tone adjustment is already in progress";

/// Classified outcome of a failed tone adjustment.
#[derive(Debug, ThisError)]
pub enum AdjustmentError {
    #[error("No Credential Error: API key is required {location}")]
    NoCredential { location: ErrorLocation },

    #[error("No Text Error: text is empty {location}")]
    NoText { location: ErrorLocation },

    #[error("Invalid Tone Error: '{tone}' is not a catalog tone {location}")]
    InvalidTone {
        tone: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: no response within {timeout_ms}ms {location}")]
    Timeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Rejected Error: HTTP {status_code} - {message} {location}")]
    ServerRejected {
        status_code: HttpStatusCode,
        message: String,
        code: Option<String>,
        location: ErrorLocation,
    },

    #[error("Malformed Response Error: {reason} {location}")]
    MalformedResponse {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Busy Error: an adjustment is already in flight {location}")]
    Busy { location: ErrorLocation },
}

impl AdjustmentError {
    #[track_caller]
    pub fn no_credential() -> Self {
        AdjustmentError::NoCredential {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_text() -> Self {
        AdjustmentError::NoText {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_tone(tone: impl Into<String>) -> Self {
        AdjustmentError::InvalidTone {
            tone: tone.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(timeout: Duration) -> Self {
        AdjustmentError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed(reason: impl Into<String>) -> Self {
        AdjustmentError::MalformedResponse {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn busy() -> Self {
        AdjustmentError::Busy {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-success HTTP response.
    ///
    /// `message` is whatever could be extracted from the error body; `None`
    /// or an empty string falls back to the generic request-failed message.
    #[track_caller]
    pub fn server_rejected(status_code: u16, message: Option<String>, code: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| API_REQUEST_FAILED_MESSAGE.to_string());

        AdjustmentError::ServerRejected {
            status_code: HttpStatusCode(status_code),
            message,
            code,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a transport error with proper categorization.
    ///
    /// Body-decoding failures on a success response are classified by the
    /// caller; everything reaching here is a timeout or a network fault.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error, timeout: Duration) -> Self {
        // Check for specific error types BEFORE converting to string
        if error.is_timeout() {
            return Self::timeout(timeout);
        }

        AdjustmentError::Network {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            AdjustmentError::NoCredential { .. } => NO_API_KEY_MESSAGE.to_string(),
            AdjustmentError::NoText { .. } => NO_TEXT_MESSAGE.to_string(),
            AdjustmentError::InvalidTone { tone, .. } => {
                format!("Unknown tone '{tone}'. Choose one of the nine catalog tones.")
            }
            AdjustmentError::Timeout { .. } => TIMEOUT_ERROR_MESSAGE.to_string(),
            AdjustmentError::Network { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            AdjustmentError::ServerRejected { message, .. } => message.clone(),
            AdjustmentError::MalformedResponse { .. } => INVALID_RESPONSE_MESSAGE.to_string(),
            AdjustmentError::Busy { .. } => BUSY_MESSAGE.to_string(),
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            AdjustmentError::NoCredential { .. } => "no_credential",
            AdjustmentError::NoText { .. } => "no_text",
            AdjustmentError::InvalidTone { .. } => "invalid_tone",
            AdjustmentError::Timeout { .. } => "timeout",
            AdjustmentError::Network { .. } => "network",
            AdjustmentError::ServerRejected { status_code, .. } if status_code.is_auth_failure() => {
                "auth_rejected"
            }
            AdjustmentError::ServerRejected { status_code, .. } if status_code.is_rate_limited() => {
                "rate_limited"
            }
            AdjustmentError::ServerRejected { status_code, .. } if status_code.is_client_error() => {
                "client_error"
            }
            AdjustmentError::ServerRejected { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            AdjustmentError::ServerRejected { .. } => "server_rejected",
            AdjustmentError::MalformedResponse { .. } => "malformed_response",
            AdjustmentError::Busy { .. } => "busy",
        }
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdjustmentError::ServerRejected { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Get the server-supplied error code if one was parsed.
    pub fn server_code(&self) -> Option<&str> {
        match self {
            AdjustmentError::ServerRejected { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
