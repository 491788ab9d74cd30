// Unit tests for advisory validation helpers

use crate::validation::{
    KeyValidationFailure, check_api_key_format, format_tone_name, is_valid_text_for_adjustment,
    preview, sanitize_text, truncate_text,
};

#[test]
fn given_well_formed_key_when_checked_then_ok() {
    assert_eq!(check_api_key_format("  AbCdEf0123456789abcdef0123456789 "), Ok(()));
    assert_eq!(check_api_key_format("abc_def-123456"), Ok(()));
}

/// **VALUE**: Verifies each advisory rejection reason.
///
/// **WHY THIS MATTERS**: The credential screen shows these reasons verbatim; a
/// wrong classification sends users hunting for the wrong problem.
#[test]
fn given_malformed_keys_when_checked_then_specific_failure() {
    assert_eq!(check_api_key_format("   "), Err(KeyValidationFailure::Empty));
    assert_eq!(
        check_api_key_format("abc123"),
        Err(KeyValidationFailure::TooShort { min: 10, actual: 6 })
    );
    assert!(matches!(
        check_api_key_format(&"a".repeat(201)),
        Err(KeyValidationFailure::TooLong { max: 200, actual: 201 })
    ));
    assert_eq!(
        check_api_key_format("your-api-key-here"),
        Err(KeyValidationFailure::PlaceholderDetected {
            pattern: "your-api-key"
        })
    );
    assert_eq!(
        check_api_key_format("abc def ghi jkl"),
        Err(KeyValidationFailure::InvalidCharacters)
    );
}

#[test]
fn given_short_or_blank_text_when_checked_then_not_valid_for_adjustment() {
    assert!(!is_valid_text_for_adjustment(""));
    assert!(!is_valid_text_for_adjustment("  hi  "));
    assert!(is_valid_text_for_adjustment("Hello"));
}

/// **VALUE**: Verifies control characters are stripped but line structure kept.
///
/// **BUG THIS CATCHES**: Would catch an over-eager pattern that also removes
/// newlines or tabs, flattening imported documents.
#[test]
fn given_text_with_control_chars_when_sanitized_then_only_controls_removed() {
    let raw = "Line one\u{0007}\n\tLine two\u{0000}\r\nend\u{007F}";

    let clean = sanitize_text(raw);

    assert_eq!(clean, "Line one\n\tLine two\r\nend");
}

#[test]
fn given_long_text_when_truncated_then_ends_with_ellipsis_within_limit() {
    assert_eq!(truncate_text("short", 10), "short");
    assert_eq!(truncate_text("abcdefghijkl", 8), "abcde...");
    assert_eq!(truncate_text("héllo wörld", 7).chars().count(), 7);
    assert!(!preview("a\nb").contains('\n'));
}

#[test]
fn given_tone_ids_when_formatted_then_title_case_words() {
    assert_eq!(format_tone_name("formal"), "Formal");
    assert_eq!(format_tone_name("very_FORMAL-tone"), "Very Formal Tone");
    assert_eq!(format_tone_name(""), "");
}
