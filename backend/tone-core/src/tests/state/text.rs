// Unit tests for TextState

use crate::state::TextState;

#[test]
fn given_initial_text_when_created_then_both_buffers_equal() {
    let text = TextState::new("Hello world");

    assert_eq!(text.original(), "Hello world");
    assert_eq!(text.current(), "Hello world");
    assert!(!text.has_changes());
}

/// **VALUE**: Verifies the working copy changes without touching the original.
///
/// **BUG THIS CATCHES**: Would catch set_current aliasing the original, which
/// would make reset a no-op.
#[test]
fn given_edit_when_set_current_then_original_untouched_and_changes_reported() {
    let mut text = TextState::new("Hey team, quick update.");

    text.set_current("Dear team, please find an update below.");

    assert_eq!(text.original(), "Hey team, quick update.");
    assert_eq!(text.current(), "Dear team, please find an update below.");
    assert!(text.has_changes());
}

#[test]
fn given_changes_when_reset_twice_then_idempotent() {
    let mut text = TextState::new("original");
    text.set_current("edited");

    text.reset();
    let after_first = text.clone();
    text.reset();

    assert_eq!(text, after_first);
    assert_eq!(text.current(), "original");
    assert!(!text.has_changes());
}

#[test]
fn given_edit_equal_to_original_when_checked_then_no_changes() {
    let mut text = TextState::new("same");

    text.set_current("different");
    text.set_current("same");

    assert!(!text.has_changes());
}

#[test]
fn given_import_when_set_original_then_both_buffers_replaced() {
    let mut text = TextState::new("old");
    text.set_current("old edited");

    text.set_original("imported");

    assert_eq!(text.original(), "imported");
    assert_eq!(text.current(), "imported");
}
