use crate::helpers::{completion_body, orchestrator_for};

use tonecraft::commands::{AdjustmentReport, adjust_once, import_file};
use tonecraft::error::TonecraftError;

use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the one-shot path: file in, adjusted text out.
///
/// **WHY THIS MATTERS**: Scripts pipe `tonecraft --text-file x --tone formal`;
/// the report must carry the imported text, not the sample text.
#[tokio::test]
async fn given_imported_file_when_adjusted_once_then_report_has_file_text() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "messages": [{ "role": "system" }, { "role": "user", "content": "Quick note from ops." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("A brief note from operations.")))
        .expect(1)
        .mount(&server)
        .await;
    let (orchestrator, _notifications) = orchestrator_for(&server, "sample", Some("abc123"));

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Quick note from ops.").unwrap();

    // WHEN
    import_file(&orchestrator, file.path()).await.unwrap();
    let report = adjust_once(&orchestrator, "Professional").await.unwrap();

    // THEN
    assert_eq!(
        report,
        AdjustmentReport {
            tone: "professional".to_string(),
            original: "Quick note from ops.".to_string(),
            adjusted: "A brief note from operations.".to_string(),
        }
    );
}

#[tokio::test]
async fn given_missing_key_when_adjusted_once_then_core_error_with_user_message() {
    // GIVEN
    let server = MockServer::start().await;
    let (orchestrator, _notifications) = orchestrator_for(&server, "Some text.", None);

    // WHEN
    let result = adjust_once(&orchestrator, "2").await;

    // THEN
    match result {
        Err(TonecraftError::Core { message, .. }) => {
            assert_eq!(message, "API key is required to use this service");
        }
        other => panic!("Expected Core error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_missing_file_when_imported_then_io_error() {
    // GIVEN
    let server = MockServer::start().await;
    let (orchestrator, _notifications) = orchestrator_for(&server, "Some text.", Some("abc123"));

    // WHEN
    let result = import_file(&orchestrator, std::path::Path::new("/no/such/file.txt")).await;

    // THEN
    assert!(matches!(result, Err(TonecraftError::Io { .. })));
}

/// **VALUE**: Verifies a core failure is reported at the application line
/// that converted it.
///
/// **WHY THIS MATTERS**: The location is printed to the user and written to
/// the log. A path inside the standard library tells nobody anything.
///
/// **BUG THIS CATCHES**: Would catch the `#[track_caller]` constructor being
/// passed to `map_err` by path, which records the closure shim's location.
#[tokio::test]
async fn given_adjustment_in_flight_when_file_imported_then_busy_error_located_in_commands() {
    // GIVEN: A slow endpoint keeps the first adjustment pending
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Adjusted."))
                .set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    let (orchestrator, _notifications) = orchestrator_for(&server, "Some text.", Some("abc123"));
    let background = orchestrator.clone();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "Replacement text.").unwrap();

    // WHEN
    let (adjusted, imported) = tokio::join!(background.select_tone("formal"), async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        import_file(&orchestrator, file.path()).await
    });

    // THEN
    assert!(adjusted.is_ok());
    match imported {
        Err(TonecraftError::Core { message, location }) => {
            assert!(message.contains("Busy"), "Got: {message}");
            assert!(location.file.ends_with("commands.rs"), "Got: {location}");
        }
        other => panic!("Expected Core error, got {other:?}"),
    }
}
