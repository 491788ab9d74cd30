// Unit tests for screen rendering

use crate::screens::{
    render_credential_screen, render_main_screen, render_notification, render_tone_grid,
    render_tone_list,
};

use tone_core::orchestrator::SessionSnapshot;
use tone_core::{AdjustmentStatus, Notification, NotificationLevel};

fn snapshot(original: &str, current: &str, tone: &str) -> SessionSnapshot {
    SessionSnapshot {
        original: original.to_string(),
        current: current.to_string(),
        has_changes: original != current,
        selected_tone: tone.to_string(),
        has_credential: true,
        last_error: None,
        status: AdjustmentStatus::Idle,
    }
}

/// **VALUE**: Verifies the grid is three rows of three with the selection marked.
///
/// **BUG THIS CATCHES**: Would catch the marker landing on the wrong cell or the
/// grid wrapping differently from the numbers users type.
#[test]
fn given_selected_tone_when_grid_rendered_then_three_rows_with_single_marker() {
    let grid = render_tone_grid("playful");

    let rows: Vec<&str> = grid.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].contains("[1] Professional") && rows[0].contains("[3] Formal"));
    assert!(rows[1].contains("*[6] Playful"), "Got: {}", rows[1]);
    assert_eq!(grid.matches('*').count(), 1);
}

#[test]
fn given_modified_text_when_main_screen_rendered_then_both_buffers_and_marker() {
    let screen = render_main_screen(&snapshot(
        "Hey team, quick update.",
        "Dear team, please find an update below.",
        "formal",
    ));

    assert!(screen.contains("Hey team, quick update."));
    assert!(screen.contains("Dear team, please find an update below."));
    assert!(screen.contains("Current (modified)"));
    assert!(screen.contains("Selected: Formal"));
}

#[test]
fn given_unchanged_text_with_error_when_rendered_then_error_shown_without_marker() {
    let mut state = snapshot("Same text.", "Same text.", "casual");
    state.last_error = Some("invalid key".to_string());

    let screen = render_main_screen(&state);

    assert!(!screen.contains("(modified)"));
    assert!(screen.contains("Last error: invalid key"));
}

#[test]
fn given_credential_screen_when_error_present_then_shown() {
    let with_error = render_credential_screen(Some("API key is required to use this service"));
    let without = render_credential_screen(None);

    assert!(with_error.contains("Error: API key is required to use this service"));
    assert!(!without.contains("Error:"));
}

#[test]
fn given_notifications_when_rendered_then_tagged_by_level() {
    let success = Notification {
        level: NotificationLevel::Success,
        title: "Tone adjusted successfully".to_string(),
        description: "Text has been adjusted to formal tone.".to_string(),
    };
    let info = Notification {
        level: NotificationLevel::Info,
        title: "Text has been reset to original".to_string(),
        description: String::new(),
    };

    assert_eq!(
        render_notification(&success),
        "[ok] Tone adjusted successfully: Text has been adjusted to formal tone.\n"
    );
    assert_eq!(
        render_notification(&info),
        "[info] Text has been reset to original\n"
    );
}

#[test]
fn given_tone_list_when_rendered_then_every_description_present() {
    let list = render_tone_list();

    assert!(list.contains("Assertive and sure"));
    assert!(list.contains("Relaxed and informal"));
    assert_eq!(list.lines().count(), 10);
}
