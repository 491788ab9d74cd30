// Unit tests for tone argument resolution

use crate::commands::resolve_tone_argument;

#[test]
fn given_tone_arguments_when_resolved_then_numbers_and_ids_normalized() {
    assert_eq!(resolve_tone_argument("3"), "formal");
    assert_eq!(resolve_tone_argument(" Playful "), "playful");
    assert_eq!(resolve_tone_argument("sarcastic"), "sarcastic");
    assert_eq!(resolve_tone_argument("42"), "42");
}
