//! Wiring for application-level tests: a real orchestrator over a memory
//! store, pointed at a wiremock endpoint.

use tone_core::config::ApiConfig;
use tone_core::error::StoreError;
use tone_core::orchestrator::Session;
use tone_core::{
    AdjustmentOrchestrator, CredentialStore, MemoryStore, MistralClient, Notification,
    PreferenceStore, TextState, ToneState,
};

use common::ErrorLocation;

use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::MockServer;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub fn completion_body(content: &str) -> Value {
    json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
}

pub fn orchestrator_for(
    server: &MockServer,
    text: &str,
    api_key: Option<&str>,
) -> (AdjustmentOrchestrator, UnboundedReceiver<Notification>) {
    orchestrator_with_store(server, text, api_key, Arc::new(MemoryStore::new()))
}

pub fn orchestrator_with_store(
    server: &MockServer,
    text: &str,
    api_key: Option<&str>,
    store: Arc<dyn PreferenceStore>,
) -> (AdjustmentOrchestrator, UnboundedReceiver<Notification>) {
    let config = ApiConfig {
        base_url: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        request_timeout_ms: 5_000,
        ..ApiConfig::default()
    };
    let session = Session::new(
        CredentialStore::load(store.clone(), api_key),
        TextState::new(text),
        ToneState::load(store),
    );

    AdjustmentOrchestrator::new(
        MistralClient::new(&config).expect("mock config should be valid"),
        session,
        None,
    )
}

/// Store that reads as empty and refuses every write, like a read-only
/// config directory.
pub struct ReadOnlyStore;

impl ReadOnlyStore {
    fn refusal() -> StoreError {
        StoreError::Poisoned {
            location: ErrorLocation::here(),
            reason: "read-only".to_string(),
        }
    }
}

impl PreferenceStore for ReadOnlyStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(Self::refusal())
    }

    fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(Self::refusal())
    }
}
