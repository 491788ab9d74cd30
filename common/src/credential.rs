//! Completion-endpoint credential with redacted Debug output.

use crate::{CredentialError, ErrorLocation};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// A bearer credential that never exposes its value in logs or debug output.
///
/// The value is trimmed on construction; a credential that is empty after
/// trimming is considered absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    inner: String,
}

impl Credential {
    /// Create a credential from raw user or environment input.
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            return Self { inner: raw };
        }

        let inner = trimmed.to_string();
        raw.zeroize();
        Self { inner }
    }

    /// An absent credential.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the actual value for the `Authorization` header.
    ///
    /// # Security Note
    /// Only call this when building the completion request or persisting to
    /// the local credential store.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Get the credential length (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        !self.inner.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Credential(<absent>)")
        } else {
            write!(f, "Credential([REDACTED])")
        }
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED CREDENTIAL]")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for Credential {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(CredentialError::Serialization {
            message: String::from("Credential cannot be serialized - use expose() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
