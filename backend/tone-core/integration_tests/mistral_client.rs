use crate::helpers::{COMPLETIONS_PATH, TEST_API_KEY, client_for, completion_body};

use common::Credential;
use tone_core::config::ApiConfig;
use tone_core::error::AdjustmentError;
use tone_core::error::adjustment::{
    API_REQUEST_FAILED_MESSAGE, INVALID_RESPONSE_MESSAGE, NETWORK_ERROR_MESSAGE,
    TIMEOUT_ERROR_MESSAGE,
};
use tone_core::{DEFAULT_MODEL, MistralClient};

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for the completion client
// Every test runs against a local mock endpoint; nothing leaves the machine.
// ============================================================================

/// **VALUE**: Verifies the full request shape and that the reply is returned trimmed.
///
/// **WHY THIS MATTERS**: The endpoint rejects requests without the bearer header
/// or with a different message layout; this is the only contract we have with it.
///
/// **BUG THIS CATCHES**: Would catch:
/// - Missing or malformed Authorization header
/// - Wrong role order or prompt text
/// - Surrounding whitespace leaking into the working text
#[tokio::test]
async fn given_valid_inputs_when_adjust_tone_then_sends_contract_and_returns_trimmed_text() {
    // GIVEN: An endpoint that only answers the exact expected request
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer abc123"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "model": DEFAULT_MODEL,
            "max_tokens": 1000,
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "Hey team, quick update." }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("  Dear team, please find an update below.\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5_000);

    // WHEN: Adjusting to the formal tone
    let result = client
        .adjust_tone(
            "Hey team, quick update.",
            "formal",
            &Credential::new(TEST_API_KEY),
            None,
        )
        .await;

    // THEN: The rewritten text comes back trimmed
    assert_eq!(
        result.expect("adjustment should succeed"),
        "Dear team, please find an update below."
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let system_prompt = body["messages"][0]["content"].as_str().unwrap();
    assert!(system_prompt.contains("\"formal\""), "Got: {system_prompt}");
}

#[tokio::test]
async fn given_model_override_when_adjust_tone_then_override_sent() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "mistral-large-latest" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok then")))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN
    let result = client_for(&server, 5_000)
        .adjust_tone(
            "Some text here",
            "casual",
            &Credential::new(TEST_API_KEY),
            Some("mistral-large-latest"),
        )
        .await;

    // THEN
    assert_eq!(result.unwrap(), "ok then");
}

/// **VALUE**: Verifies precondition failures never touch the network.
///
/// **BUG THIS CATCHES**: Would catch a request being sent with an empty bearer
/// token, which burns a round trip and returns a confusing 401.
#[tokio::test]
async fn given_blank_credential_or_text_when_adjust_tone_then_no_request_sent() {
    // GIVEN: An endpoint that must never be called
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let client = client_for(&server, 5_000);

    // WHEN
    let no_key = client
        .adjust_tone("Hello world", "formal", &Credential::new("   "), None)
        .await;
    let no_text = client
        .adjust_tone("  \n ", "formal", &Credential::new(TEST_API_KEY), None)
        .await;

    // THEN
    assert!(matches!(no_key, Err(AdjustmentError::NoCredential { .. })));
    assert!(matches!(no_text, Err(AdjustmentError::NoText { .. })));
}

#[tokio::test]
async fn given_error_body_with_message_when_rejected_then_server_message_surfaced() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "invalid key", "code": "unauthorized" } })),
        )
        .mount(&server)
        .await;

    // WHEN
    let error = client_for(&server, 5_000)
        .adjust_tone("Hello world", "formal", &Credential::new("bad-key-000"), None)
        .await
        .unwrap_err();

    // THEN
    assert_eq!(error.user_message(), "invalid key");
    assert_eq!(error.status_code(), Some(401));
    assert_eq!(error.server_code(), Some("unauthorized"));
    assert_eq!(error.error_category(), "auth_rejected");
}

/// **VALUE**: Verifies unreadable error bodies fall back to the generic message.
///
/// **BUG THIS CATCHES**: Would catch an HTML error page from a proxy being shown
/// to the user, or a parse failure masking the HTTP failure.
#[tokio::test]
async fn given_non_json_error_body_when_rejected_then_generic_message() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    // WHEN
    let error = client_for(&server, 5_000)
        .adjust_tone("Hello world", "formal", &Credential::new(TEST_API_KEY), None)
        .await
        .unwrap_err();

    // THEN
    assert_eq!(error.user_message(), API_REQUEST_FAILED_MESSAGE);
    assert_eq!(error.status_code(), Some(502));
}

#[tokio::test]
async fn given_success_without_content_when_adjust_tone_then_malformed() {
    // GIVEN: A 200 whose first choice has no content, and one that is not JSON
    let empty_choices = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&empty_choices)
        .await;

    let not_json = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&not_json)
        .await;

    let credential = Credential::new(TEST_API_KEY);

    // WHEN
    let first = client_for(&empty_choices, 5_000)
        .adjust_tone("Hello world", "formal", &credential, None)
        .await
        .unwrap_err();
    let second = client_for(&not_json, 5_000)
        .adjust_tone("Hello world", "formal", &credential, None)
        .await
        .unwrap_err();

    // THEN
    for error in [first, second] {
        assert!(matches!(error, AdjustmentError::MalformedResponse { .. }));
        assert_eq!(error.user_message(), INVALID_RESPONSE_MESSAGE);
    }
}

/// **VALUE**: Verifies a stalled endpoint ends as a timeout within the bound.
///
/// **WHY THIS MATTERS**: Without a bound the loading state would never clear and
/// the user could not adjust again.
#[tokio::test]
async fn given_slow_endpoint_when_timeout_elapses_then_timeout_error() {
    // GIVEN: A reply delayed well past the client timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    // WHEN
    let started = std::time::Instant::now();
    let error = client_for(&server, 200)
        .adjust_tone("Hello world", "formal", &Credential::new(TEST_API_KEY), None)
        .await
        .unwrap_err();

    // THEN
    assert!(matches!(error, AdjustmentError::Timeout { timeout_ms: 200, .. }));
    assert_eq!(error.user_message(), TIMEOUT_ERROR_MESSAGE);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_adjust_tone_then_network_error() {
    // GIVEN: A port with nothing listening (bound then released)
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{port}{COMPLETIONS_PATH}");
    let client = MistralClient::new(&ApiConfig {
        base_url,
        request_timeout_ms: 2_000,
        ..ApiConfig::default()
    })
    .unwrap();

    // WHEN
    let error = client
        .adjust_tone("Hello world", "formal", &Credential::new(TEST_API_KEY), None)
        .await
        .unwrap_err();

    // THEN
    assert!(
        matches!(
            error,
            AdjustmentError::Network { .. } | AdjustmentError::Timeout { .. }
        ),
        "Got: {error}"
    );
    if matches!(error, AdjustmentError::Network { .. }) {
        assert_eq!(error.user_message(), NETWORK_ERROR_MESSAGE);
    }
}
