use crate::helpers::{
    COMPLETIONS_PATH, ReadOnlyStore, completion_body, orchestrator_for, orchestrator_with_store,
};

use tonecraft::repl::Repl;

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Scripted sessions: the REPL reads from an in-memory buffer and writes to a
// Vec<u8>, so every screen the user would see can be asserted on.
// ============================================================================

async fn run_script(
    server: &MockServer,
    text: &str,
    api_key: Option<&str>,
    script: &str,
) -> String {
    let (orchestrator, notifications) = orchestrator_for(server, text, api_key);
    let mut repl = Repl::new(orchestrator, notifications, script.as_bytes(), Vec::new());
    repl.run().await.expect("session should end cleanly");
    String::from_utf8(repl.into_output()).expect("output is UTF-8")
}

/// **VALUE**: Verifies the main path a user takes: pick a tone by number and
/// see the rewritten text.
///
/// **BUG THIS CATCHES**: Would catch the grid number resolving to a different
/// tone than the one printed, or the screen not refreshing after success.
#[tokio::test]
async fn given_key_present_when_tone_number_entered_then_adjusted_text_shown() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Dear team, please find an update below.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: "3" is Formal in the grid
    let output = run_script(&server, "Hey team, quick update.", Some("abc123"), "3\n:quit\n").await;

    // THEN
    assert!(output.contains("Adjusting to Formal tone..."), "Got:\n{output}");
    assert!(output.contains("[ok] Tone adjusted successfully"));
    assert!(output.contains("Current (modified)"));
    assert!(output.contains("Dear team, please find an update below."));
    assert!(output.contains("*[3] Formal"));
}

/// **VALUE**: Verifies the credential screen gates the main screen and a pasted
/// key unlocks it.
#[tokio::test]
async fn given_no_key_when_key_entered_then_main_screen_shown() {
    // GIVEN
    let server = MockServer::start().await;

    // WHEN
    let output = run_script(&server, "Some text.", None, "sk-test-1234567890\n:quit\n").await;

    // THEN
    assert!(output.contains("A Mistral API key is required"));
    assert!(output.contains("[ok] API key saved successfully"));
    assert!(output.contains("== Original"));
    assert!(!output.contains("Warning:"));
}

#[tokio::test]
async fn given_placeholder_key_when_entered_then_warned_but_saved() {
    // GIVEN
    let server = MockServer::start().await;

    // WHEN
    let output = run_script(&server, "Some text.", None, "your-api-key-here\n:quit\n").await;

    // THEN
    assert!(output.contains("Warning: the key looks like a placeholder"));
    assert!(output.contains("== Original"));
}

/// **VALUE**: Verifies a rejected key surfaces the server message and leaves the text.
#[tokio::test]
async fn given_rejected_key_when_tone_selected_then_error_notification_and_text_kept() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "invalid key" } })),
        )
        .mount(&server)
        .await;

    // WHEN
    let output = run_script(&server, "Hello world.", Some("bad-key-000"), "1\n:show\n:quit\n").await;

    // THEN
    assert!(output.contains("[error] Error adjusting tone: invalid key"), "Got:\n{output}");
    assert!(output.contains("Last error: invalid key"));
    assert!(!output.contains("(modified)"));
}

#[tokio::test]
async fn given_edit_block_when_reset_then_original_restored() {
    // GIVEN
    let server = MockServer::start().await;
    let script = ":edit\nFirst line\nSecond line\n.\n:reset\n:quit\n";

    // WHEN
    let output = run_script(&server, "Original text.", Some("abc123"), script).await;

    // THEN
    assert!(output.contains("First line\nSecond line"));
    assert!(output.contains("Current (modified)"));
    assert!(output.contains("[info] Text has been reset to original"));
}

/// **VALUE**: Verifies a read-only preference store does not end the session
/// on `:reset`.
///
/// **WHY THIS MATTERS**: The text reset is in memory; only the default tone is
/// written out. Losing that write must not throw the user out of the app.
///
/// **BUG THIS CATCHES**: Would catch a store write failure during reset
/// propagating out of `Repl::run` and exiting the process.
#[tokio::test]
async fn given_read_only_store_when_reset_then_session_continues() {
    // GIVEN
    let server = MockServer::start().await;
    let (orchestrator, notifications) = orchestrator_with_store(
        &server,
        "Original text.",
        Some("abc123"),
        Arc::new(ReadOnlyStore),
    );
    let script = ":edit\nChanged.\n.\n:reset\n:show\n:quit\n";
    let mut repl = Repl::new(orchestrator, notifications, script.as_bytes(), Vec::new());

    // WHEN
    let result = repl.run().await;

    // THEN
    assert!(result.is_ok(), "Got: {result:?}");
    let output = String::from_utf8(repl.into_output()).expect("output is UTF-8");
    assert!(output.contains("[info] Text has been reset to original"), "Got:\n{output}");
    let last_screen = output.rsplit("== Original").next().unwrap_or_default();
    assert!(last_screen.contains("Original text."));
    assert!(!last_screen.contains("(modified)"));
}

#[tokio::test]
async fn given_logout_when_next_prompt_then_credential_screen_again() {
    // GIVEN
    let server = MockServer::start().await;

    // WHEN
    let output = run_script(&server, "Text.", Some("abc123"), ":logout\n:quit\n").await;

    // THEN
    assert!(output.contains("API key removed."));
    assert!(output.contains("A Mistral API key is required"));
}

#[tokio::test]
async fn given_bad_commands_when_entered_then_hints_printed_and_session_continues() {
    // GIVEN
    let server = MockServer::start().await;
    let script = ":frobnicate\nmake it nicer\n12\n:tone sarcastic\n:load /definitely/not/here.txt\n";

    // WHEN: input ends without :quit
    let output = run_script(&server, "Text to adjust.", Some("abc123"), script).await;

    // THEN
    assert!(output.contains("Unknown command ':frobnicate'"));
    assert!(output.contains("Type a tone number (1-9)"));
    assert!(output.contains("No tone at position 12"));
    assert!(output.contains("Unknown tone 'sarcastic'"));
    assert!(output.contains("Could not read /definitely/not/here.txt"));
}
