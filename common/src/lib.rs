//! Shared leaf types for Tonecraft.
//!
//! This crate holds the small pieces every other crate needs and that carry
//! no business logic of their own:
//!
//! - **ErrorLocation**: file/line/column captured at the error site
//! - **Credential**: the completion-endpoint secret, redacted everywhere
//! - **HttpStatusCode**: status codes kept as data for error classification
//!
//! ## Architecture
//!
//! - **common** (this crate): Leaf types
//! - **tone-core**: Business logic (state, client, orchestrator)
//! - **tonecraft**: Application wiring and terminal screens

pub mod credential;
pub mod error;
pub mod http_status;

pub use credential::Credential;
pub use error::error_location::ErrorLocation;
pub use error::credential_error::CredentialError;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
