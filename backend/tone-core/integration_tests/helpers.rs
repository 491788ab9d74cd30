//! Test helpers for completion-endpoint integration tests.
//!
//! - Mock endpoint setup (wiremock)
//! - Canned success and error bodies
//! - Orchestrator wiring over an in-memory store

use tone_core::config::ApiConfig;
use tone_core::orchestrator::Session;
use tone_core::{
    AdjustmentOrchestrator, CredentialStore, MemoryStore, MistralClient, Notification, TextState,
    ToneState,
};

use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::MockServer;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const TEST_API_KEY: &str = "abc123";

/// Client pointed at the mock server with the given timeout.
pub fn client_for(server: &MockServer, request_timeout_ms: u64) -> MistralClient {
    let config = ApiConfig {
        base_url: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        request_timeout_ms,
        ..ApiConfig::default()
    };
    MistralClient::new(&config).expect("mock config should be valid")
}

/// Success body in the chat-completion shape.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "cmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54 }
    })
}

pub struct Harness {
    pub orchestrator: AdjustmentOrchestrator,
    pub notifications: UnboundedReceiver<Notification>,
    pub store: Arc<MemoryStore>,
}

/// Orchestrator over a memory store, seeded with `text` and optionally a key.
pub fn orchestrator_for(server: &MockServer, text: &str, api_key: Option<&str>) -> Harness {
    orchestrator_with_timeout(server, text, api_key, 5_000)
}

pub fn orchestrator_with_timeout(
    server: &MockServer,
    text: &str,
    api_key: Option<&str>,
    request_timeout_ms: u64,
) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let session = Session::new(
        CredentialStore::load(store.clone(), api_key),
        TextState::new(text),
        ToneState::load(store.clone()),
    );
    let (orchestrator, notifications) =
        AdjustmentOrchestrator::new(client_for(server, request_timeout_ms), session, None);

    Harness {
        orchestrator,
        notifications,
        store,
    }
}

/// Drain every notification queued so far.
pub fn drain(notifications: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut drained = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        drained.push(notification);
    }
    drained
}
