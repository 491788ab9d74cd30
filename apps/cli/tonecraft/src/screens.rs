//! Plain-text rendering of the two screens.
//!
//! Every function returns a `String` so the REPL decides where it goes and
//! tests can assert on it directly.

use tone_core::orchestrator::SessionSnapshot;
use tone_core::tones::{TONE_CATALOG, grid_rows};
use tone_core::validation::KeyValidationFailure;
use tone_core::{AdjustmentOrchestrator, Notification, NotificationLevel};

use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const GRID_CELL_WIDTH: usize = 18;

pub const PROMPT: &str = "> ";
pub const KEY_PROMPT: &str = "API key> ";

fn section(title: &str) -> String {
    let prefix = format!("== {title} ");
    let fill = RULE_WIDTH.saturating_sub(prefix.chars().count());
    format!("{prefix}{}\n", "=".repeat(fill))
}

pub fn render_credential_screen(last_error: Option<&str>) -> String {
    let mut out = section("Tonecraft");
    out.push_str("A Mistral API key is required to adjust text.\n");
    out.push_str("Paste your key and press Enter (:quit to exit).\n");
    if let Some(error) = last_error {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}

/// Advisory warning for a key that does not look right. The key is kept.
pub fn render_key_warning(failure: &KeyValidationFailure) -> String {
    format!("Warning: the key {failure}. It was saved anyway.\n")
}

/// 3x3 grid with grid numbers; `*` marks the selected tone.
pub fn render_tone_grid(selected: &str) -> String {
    let mut out = String::new();
    for row in grid_rows() {
        for tone in row {
            let marker = if tone.id == selected { '*' } else { ' ' };
            let cell = format!("{marker}[{}] {}", tone.grid_index(), tone.label);
            let _ = write!(out, "{cell:<width$}", width = GRID_CELL_WIDTH);
        }
        out.truncate(out.trim_end().len());
        out.push('\n');
    }
    out
}

pub fn render_main_screen(snapshot: &SessionSnapshot) -> String {
    let mut out = section("Original");
    let _ = writeln!(out, "{}", snapshot.original);

    let current_title = if snapshot.has_changes {
        "Current (modified)"
    } else {
        "Current"
    };
    out.push_str(&section(current_title));
    let _ = writeln!(out, "{}", snapshot.current);

    out.push_str(&section("Tones"));
    out.push_str(&render_tone_grid(&snapshot.selected_tone));
    let _ = writeln!(
        out,
        "Selected: {}",
        AdjustmentOrchestrator::tone_label(&snapshot.selected_tone)
    );
    if let Some(error) = &snapshot.last_error {
        let _ = writeln!(out, "Last error: {error}");
    }
    out.push_str("Type 1-9 to adjust, :help for commands.\n");
    out
}

/// Catalog listing with descriptions.
pub fn render_tone_list() -> String {
    let mut out = section("Tones");
    for tone in &TONE_CATALOG {
        let _ = writeln!(
            out,
            "{:>2}. {:<13} {:<13} {}",
            tone.grid_index(),
            tone.id,
            tone.label,
            tone.description.unwrap_or("")
        );
    }
    out
}

pub fn render_loading(tone: &str) -> String {
    format!(
        "Adjusting to {} tone...\n",
        AdjustmentOrchestrator::tone_label(tone)
    )
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
        NotificationLevel::Info => "info",
    };

    if notification.description.is_empty() {
        format!("[{tag}] {}\n", notification.title)
    } else {
        format!(
            "[{tag}] {}: {}\n",
            notification.title, notification.description
        )
    }
}

pub fn render_help() -> String {
    let mut out = section("Commands");
    out.push_str(
        "  1-9            adjust to the tone at that grid position\n\
         \x20 :tone <id>     adjust to a tone by id (see :tones)\n\
         \x20 :edit          replace the working text; end with a line containing only '.'\n\
         \x20 :load <path>   load a file as the new original text\n\
         \x20 :reset         restore the original text and the default tone\n\
         \x20 :show          show the text and the tone grid\n\
         \x20 :tones         list tones with descriptions\n\
         \x20 :logout        forget the API key\n\
         \x20 :help          show this list\n\
         \x20 :quit          exit\n",
    );
    out
}
