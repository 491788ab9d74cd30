pub mod config;
pub mod error;
pub mod mistral_client;
pub mod orchestrator;
pub mod persistence;
pub mod state;
pub mod tones;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::AppConfig;
pub use mistral_client::MistralClient;
pub use orchestrator::{AdjustmentOrchestrator, AdjustmentStatus, Notification, NotificationLevel};
pub use persistence::{FileStore, MemoryStore, PreferenceStore};
pub use state::{CredentialStore, TextState, ToneState};
pub use tones::{TONE_CATALOG, ToneOption};

pub const MISTRAL_API_HOST: &str = "api.mistral.ai";
pub const MISTRAL_CHAT_COMPLETIONS_URL: &str =
    const_format::concatcp!("https://", MISTRAL_API_HOST, "/v1/chat/completions");
pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_TONE: &str = "casual";
