//! Advisory input checks.
//!
//! Nothing here is authoritative: the credential store accepts any
//! non-blank key and the completion client only requires non-blank text.
//! These checks drive warnings on the credential-entry and main screens.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

const MIN_KEY_LENGTH: usize = 10;
const MAX_KEY_LENGTH: usize = 200;
const MIN_TEXT_LENGTH: usize = 5;
const PREVIEW_LENGTH: usize = 40;

// Control characters except tab, newline and carriage return.
const CONTROL_CHAR_PATTERN: &str = r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]";

static CONTROL_CHAR_REGEX: OnceLock<Regex> = OnceLock::new();

fn control_char_regex() -> &'static Regex {
    CONTROL_CHAR_REGEX.get_or_init(|| Regex::new(CONTROL_CHAR_PATTERN).expect("valid regex pattern"))
}

/// Specific reasons an API key looks wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValidationFailure {
    Empty,
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    PlaceholderDetected { pattern: &'static str },
    InvalidCharacters,
}

impl fmt::Display for KeyValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "key is empty"),
            Self::TooShort { min, actual } => {
                write!(f, "key too short ({} chars, minimum {})", actual, min)
            }
            Self::TooLong { max, actual } => {
                write!(f, "key too long ({} chars, maximum {})", actual, max)
            }
            Self::PlaceholderDetected { pattern } => {
                write!(f, "looks like a placeholder ('{}')", pattern)
            }
            Self::InvalidCharacters => {
                write!(f, "only letters, digits, '-' and '_' are expected")
            }
        }
    }
}

/// Check that a pasted key has the expected shape.
pub fn check_api_key_format(key: &str) -> Result<(), KeyValidationFailure> {
    let trimmed = key.trim();

    if trimmed.is_empty() {
        return Err(KeyValidationFailure::Empty);
    }

    let length = trimmed.chars().count();
    if length < MIN_KEY_LENGTH {
        return Err(KeyValidationFailure::TooShort {
            min: MIN_KEY_LENGTH,
            actual: length,
        });
    }

    if length > MAX_KEY_LENGTH {
        return Err(KeyValidationFailure::TooLong {
            max: MAX_KEY_LENGTH,
            actual: length,
        });
    }

    if let Some(pattern) = detect_placeholder(trimmed) {
        return Err(KeyValidationFailure::PlaceholderDetected { pattern });
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(KeyValidationFailure::InvalidCharacters);
    }

    Ok(())
}

fn detect_placeholder(key: &str) -> Option<&'static str> {
    let lower = key.to_lowercase();

    static PATTERNS: &[(&str, &str)] = &[
        ("your-api-key", "your-api-key"),
        ("your_api_key", "your_api_key"),
        ("<your", "<your...>"),
        ("placeholder", "placeholder"),
        ("xxxx", "xxxx"),
        ("changeme", "changeme"),
    ];

    PATTERNS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, name)| *name)
}

/// Whether `text` is worth sending: at least a few characters after trimming.
pub fn is_valid_text_for_adjustment(text: &str) -> bool {
    text.trim().chars().count() >= MIN_TEXT_LENGTH
}

/// Strip control characters, keeping tabs and line breaks.
pub fn sanitize_text(text: &str) -> String {
    control_char_regex().replace_all(text, "").into_owned()
}

/// Truncate to `max_chars` characters, ending with "..." when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Short single-line excerpt for debug logs.
pub fn preview(text: &str) -> String {
    truncate_text(&text.replace(['\n', '\r'], " "), PREVIEW_LENGTH)
}

/// "very_formal" / "very-formal" -> "Very Formal".
pub fn format_tone_name(tone: &str) -> String {
    tone.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
