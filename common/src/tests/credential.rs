use crate::Credential;

/// **VALUE**: Verifies that the secret never shows up in Debug or Display output.
///
/// **WHY THIS MATTERS**: Credentials travel through state holders that are logged
/// with `{:?}`. A derived Debug would write the key straight into the log file.
///
/// **BUG THIS CATCHES**: Would catch if someone replaces the manual Debug impl
/// with `#[derive(Debug)]`.
#[test]
fn given_credential_when_formatted_then_secret_is_redacted() {
    // GIVEN: A credential
    let credential = Credential::new("abc123-secret");

    // WHEN: Formatting it both ways
    let debug = format!("{:?}", credential);
    let display = format!("{}", credential);

    // THEN: Neither contains the secret
    assert!(!debug.contains("abc123"), "Debug leaked the secret: {debug}");
    assert!(!display.contains("abc123"), "Display leaked the secret: {display}");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies that serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a credential accidentally ending up in a
/// serialized snapshot or config file.
#[test]
fn given_credential_when_serialized_then_fails() {
    // GIVEN: A credential
    let credential = Credential::new("abc123");

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&credential);

    // THEN: Serialization fails with a descriptive message
    let err = result.expect_err("Credential serialization must fail");
    assert!(err.to_string().contains("cannot be serialized"));
}

/// **VALUE**: Verifies trimming and the absent/present distinction.
///
/// **WHY THIS MATTERS**: Whitespace-only input must count as "no credential" so
/// the credential-entry screen stays up instead of sending an empty bearer token.
#[test]
fn given_padded_or_blank_input_when_credential_created_then_trimmed() {
    // GIVEN/WHEN: Padded and blank inputs
    let padded = Credential::new("  abc123 \n");
    let blank = Credential::new("   \t ");

    // THEN: Padded is trimmed and present, blank is absent
    assert_eq!(padded.expose(), "abc123");
    assert!(padded.is_present());
    assert_eq!(padded.len(), 6);
    assert!(blank.is_empty());
    assert!(!blank.is_present());
    assert_eq!(blank, Credential::empty());
}
