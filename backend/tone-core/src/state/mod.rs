//! Process-scoped state holders.
//!
//! - [`CredentialStore`]: the completion credential, persisted on every change
//! - [`TextState`]: original and working copies of the user's text
//! - [`ToneState`]: the selected tone, persisted on every change

pub mod credential;
pub mod text;
pub mod tone;

pub use credential::CredentialStore;
pub use text::TextState;
pub use tone::ToneState;
