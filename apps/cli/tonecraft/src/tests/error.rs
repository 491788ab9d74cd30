// Unit tests for error module
// Errors are serialized for --json one-shot output.

use crate::error::TonecraftError;

/// **VALUE**: Verifies errors serialize with a variant tag and the message.
///
/// **BUG THIS CATCHES**: Would catch a non-serializable field being added, which
/// would make `--json` fall over exactly when it has an error to report.
#[test]
fn given_tonecraft_error_when_serialized_then_tagged_json() {
    // GIVEN
    let err = TonecraftError::core("Request timed out. Please try again.");

    // WHEN
    let json = serde_json::to_value(&err).expect("error should serialize");

    // THEN
    assert_eq!(json["type"], "Core");
    assert_eq!(
        json["data"]["message"],
        "Request timed out. Please try again."
    );
    assert!(json["data"]["location"]["line"].as_u64().unwrap() > 0);
}

#[test]
fn given_io_error_when_displayed_then_prefixed_with_kind() {
    let err = TonecraftError::io(std::io::Error::other("broken pipe"));

    let formatted = err.to_string();

    assert!(formatted.starts_with("IO Error: broken pipe"), "Got: {formatted}");
}
