use crate::helpers::{
    COMPLETIONS_PATH, TEST_API_KEY, completion_body, drain, orchestrator_for,
    orchestrator_with_timeout,
};

use tone_core::error::adjustment::{NO_API_KEY_MESSAGE, NO_TEXT_MESSAGE, TIMEOUT_ERROR_MESSAGE};
use tone_core::error::{AdjustmentError, CoreError};
use tone_core::orchestrator::{ADJUSTMENT_FAILED_TITLE, TONE_ADJUSTED_TITLE};
use tone_core::persistence::LAST_TONE_STORAGE_KEY;
use tone_core::{AdjustmentStatus, DEFAULT_TONE, NotificationLevel, PreferenceStore};

use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Orchestrator tests: tone selection through to the working text
// ============================================================================

/// **VALUE**: Verifies the happy path end to end.
///
/// **WHY THIS MATTERS**: This is the one thing the application does. The working
/// text must change, the original must not, and the user must be told.
///
/// **BUG THIS CATCHES**: Would catch:
/// - The adjusted text overwriting the original
/// - The selected tone not being persisted
/// - A missing success notification
#[tokio::test]
async fn given_formal_tone_when_selected_then_working_text_adjusted_and_original_kept() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Dear team, please find an update below.")),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut harness = orchestrator_for(&server, "Hey team, quick update.", Some(TEST_API_KEY));

    // WHEN
    let result = harness.orchestrator.select_tone("formal").await;

    // THEN
    assert_eq!(result.unwrap(), "Dear team, please find an update below.");

    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.original, "Hey team, quick update.");
    assert_eq!(snapshot.current, "Dear team, please find an update below.");
    assert!(snapshot.has_changes);
    assert_eq!(snapshot.selected_tone, "formal");
    assert_eq!(snapshot.last_error, None);
    assert_eq!(snapshot.status, AdjustmentStatus::Idle);
    assert_eq!(
        harness.store.load(LAST_TONE_STORAGE_KEY).unwrap().as_deref(),
        Some("formal")
    );

    let notifications = drain(&mut harness.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Success);
    assert_eq!(notifications[0].title, TONE_ADJUSTED_TITLE);
    assert!(notifications[0].description.contains("formal"));
}

#[tokio::test]
async fn given_request_adjustment_when_succeeds_then_selection_unchanged() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Yo team!")))
        .mount(&server)
        .await;
    let harness = orchestrator_for(&server, "Hello team.", Some(TEST_API_KEY));

    // WHEN
    harness.orchestrator.request_adjustment("playful").await.unwrap();

    // THEN
    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.current, "Yo team!");
    assert_eq!(snapshot.selected_tone, DEFAULT_TONE);
}

/// **VALUE**: Verifies a rejected call leaves the text alone and records the error.
///
/// **BUG THIS CATCHES**: Would catch the error body being written into the
/// working text, or the error being lost before the credential screen reads it.
#[tokio::test]
async fn given_rejected_key_when_selected_then_text_unchanged_and_error_recorded() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "invalid key" } })),
        )
        .mount(&server)
        .await;
    let mut harness = orchestrator_for(&server, "Hey team, quick update.", Some("bad-key-000"));

    // WHEN
    let result = harness.orchestrator.select_tone("formal").await;

    // THEN
    assert_eq!(result.unwrap_err().user_message(), "invalid key");

    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.current, "Hey team, quick update.");
    assert!(!snapshot.has_changes);
    assert_eq!(snapshot.last_error.as_deref(), Some("invalid key"));

    let notifications = drain(&mut harness.notifications);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].title, ADJUSTMENT_FAILED_TITLE);
    assert_eq!(notifications[0].description, "invalid key");
}

#[tokio::test]
async fn given_no_credential_or_no_text_when_selected_then_no_request_and_error_recorded() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let without_key = orchestrator_for(&server, "Hello world", None);
    let without_text = orchestrator_for(&server, "   ", Some(TEST_API_KEY));

    // WHEN
    let no_key = without_key.orchestrator.select_tone("formal").await;
    let no_text = without_text.orchestrator.select_tone("formal").await;

    // THEN
    assert!(matches!(no_key, Err(AdjustmentError::NoCredential { .. })));
    assert_eq!(
        without_key.orchestrator.last_error().await.as_deref(),
        Some(NO_API_KEY_MESSAGE)
    );
    assert!(matches!(no_text, Err(AdjustmentError::NoText { .. })));
    assert_eq!(
        without_text.orchestrator.last_error().await.as_deref(),
        Some(NO_TEXT_MESSAGE)
    );
}

/// **VALUE**: Verifies unknown tones are refused before any request or persistence.
#[tokio::test]
async fn given_unknown_tone_when_selected_then_rejected_without_request() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;
    let harness = orchestrator_for(&server, "Hello world", Some(TEST_API_KEY));

    // WHEN
    let result = harness.orchestrator.select_tone("sarcastic").await;

    // THEN
    assert!(matches!(result, Err(AdjustmentError::InvalidTone { .. })));
    assert_eq!(harness.orchestrator.snapshot().await.selected_tone, DEFAULT_TONE);
    assert_eq!(harness.store.load(LAST_TONE_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies overlapping selections produce exactly one request.
///
/// **WHY THIS MATTERS**: Two replies racing to overwrite the working text would
/// leave whichever finished last, regardless of which tone the user picked last.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set race on the in-flight flag.
#[tokio::test]
async fn given_adjustment_in_flight_when_second_requested_then_busy_and_single_request() {
    // GIVEN: A slow endpoint so the first call is still pending
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "messages": [{ "role": "system" }, { "role": "user" }] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Greetings, colleagues."))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut harness = orchestrator_for(&server, "Hi all.", Some(TEST_API_KEY));
    let first_orchestrator = harness.orchestrator.clone();
    let second_orchestrator = harness.orchestrator.clone();

    // WHEN: Two selections race
    let (first, second) = tokio::join!(
        first_orchestrator.select_tone("formal"),
        second_orchestrator.select_tone("playful"),
    );

    // THEN: The first wins, the second is rejected without touching state
    assert_eq!(first.unwrap(), "Greetings, colleagues.");
    assert!(matches!(second, Err(AdjustmentError::Busy { .. })));

    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.current, "Greetings, colleagues.");
    assert_eq!(snapshot.selected_tone, "formal");
    assert_eq!(snapshot.last_error, None);
    assert!(!harness.orchestrator.is_loading());

    let levels: Vec<_> = drain(&mut harness.notifications)
        .into_iter()
        .map(|n| n.level)
        .collect();
    assert_eq!(levels, vec![NotificationLevel::Info, NotificationLevel::Success]);
}

#[tokio::test]
async fn given_adjustment_in_flight_when_editing_then_edit_rejected() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Adjusted."))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    let harness = orchestrator_for(&server, "Original text.", Some(TEST_API_KEY));
    let background = harness.orchestrator.clone();

    // WHEN: An edit arrives while the adjustment is pending
    let (adjusted, edit) = tokio::join!(background.select_tone("formal"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        harness.orchestrator.edit_text("my own edit").await
    });

    // THEN
    assert!(adjusted.is_ok());
    assert!(matches!(
        edit,
        Err(CoreError::Adjustment(AdjustmentError::Busy { .. }))
    ));
    assert_eq!(harness.orchestrator.snapshot().await.current, "Adjusted.");
}

#[tokio::test]
async fn given_slow_endpoint_when_selected_then_timeout_recorded_and_idle_again() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let harness = orchestrator_with_timeout(&server, "Hello world", Some(TEST_API_KEY), 200);

    // WHEN
    let result = harness.orchestrator.select_tone("formal").await;

    // THEN
    assert!(matches!(result, Err(AdjustmentError::Timeout { .. })));
    assert!(!harness.orchestrator.is_loading());
    assert_eq!(
        harness.orchestrator.last_error().await.as_deref(),
        Some(TIMEOUT_ERROR_MESSAGE)
    );
}

/// **VALUE**: Verifies reset restores text and tone, and a new success clears the old error.
#[tokio::test]
async fn given_adjusted_text_when_reset_then_original_and_default_tone_restored() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Adjusted.")))
        .mount(&server)
        .await;
    let harness = orchestrator_for(&server, "Original.", Some(TEST_API_KEY));
    harness.orchestrator.select_tone("concise").await.unwrap();

    // WHEN
    harness.orchestrator.reset().await.unwrap();
    harness.orchestrator.reset().await.unwrap();

    // THEN
    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.current, "Original.");
    assert!(!snapshot.has_changes);
    assert_eq!(snapshot.selected_tone, DEFAULT_TONE);
}

#[tokio::test]
async fn given_failed_attempt_when_credential_set_then_error_cleared() {
    // GIVEN
    let server = MockServer::start().await;
    let harness = orchestrator_for(&server, "Hello world", None);
    let _ = harness.orchestrator.select_tone("formal").await;
    assert!(harness.orchestrator.last_error().await.is_some());

    // WHEN
    harness
        .orchestrator
        .set_credential("fresh-key-123")
        .await
        .unwrap();

    // THEN
    assert!(harness.orchestrator.has_credential().await);
    assert_eq!(harness.orchestrator.last_error().await, None);
}

#[tokio::test]
async fn given_imported_text_with_control_chars_when_imported_then_sanitized_original() {
    // GIVEN
    let server = MockServer::start().await;
    let harness = orchestrator_for(&server, "Old.", Some(TEST_API_KEY));

    // WHEN
    harness
        .orchestrator
        .import_text("New\u{0007} draft\nline two")
        .await
        .unwrap();

    // THEN
    let snapshot = harness.orchestrator.snapshot().await;
    assert_eq!(snapshot.original, "New draft\nline two");
    assert_eq!(snapshot.current, "New draft\nline two");
}

/// **VALUE**: Verifies an accepted edit is never lost to a reply computed
/// from the text it replaced.
///
/// **WHY THIS MATTERS**: The user types over the working copy while a tone is
/// being applied. Either the edit is refused as busy, or it is the text the
/// endpoint sees, or it lands after the reply. Silently discarding it is not
/// an option.
///
/// **BUG THIS CATCHES**: Would catch the busy check running before the session
/// lock is taken, which lets an adjustment snapshot the old text in between.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_edit_racing_adjustment_when_edit_accepted_then_edit_not_clobbered() {
    for _ in 0..25 {
        // GIVEN
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Adjusted.")))
            .mount(&server)
            .await;
        let harness = orchestrator_for(&server, "Original text.", Some(TEST_API_KEY));
        let adjusting = harness.orchestrator.clone();
        let editing = harness.orchestrator.clone();

        // WHEN: The selection and the edit run on separate workers
        let adjustment = tokio::spawn(async move { adjusting.select_tone("formal").await });
        let edit = tokio::spawn(async move { editing.edit_text("My own edit.").await });
        let adjusted = adjustment.await.unwrap();
        let edit = edit.await.unwrap();

        // THEN
        assert!(adjusted.is_ok(), "Got: {adjusted:?}");
        if edit.is_ok() {
            let requests = server.received_requests().await.unwrap();
            let body: Value = requests[0].body_json().unwrap();
            let sent = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
            let current = harness.orchestrator.snapshot().await.current;
            assert!(
                sent == "My own edit." || current == "My own edit.",
                "Accepted edit was lost: sent {sent:?}, current {current:?}"
            );
        } else {
            assert!(matches!(
                edit,
                Err(CoreError::Adjustment(AdjustmentError::Busy { .. }))
            ));
        }
    }
}
