//! JSON shapes exchanged with the chat-completion endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 2],
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    /// System instruction followed by the raw user text.
    pub fn tone_adjustment(model: &'a str, system_prompt: &'a str, text: &'a str) -> Self {
        Self {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Build the system instruction for `tone`. The tone is embedded verbatim.
pub fn build_system_prompt(tone: &str) -> String {
    format!(
        "You are a professional text editor that adjusts the tone of text.\n\
         Rewrite the provided text to match the \"{tone}\" tone while preserving the core meaning and message.\n\
         Keep the same structure and key information, only adjust the language style and tone.\n\
         Return only the rewritten text without any additional commentary or explanation."
    )
}

// ============================================
// SUCCESS BODY
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it is present and not blank.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

// ============================================
// ERROR BODY
// ============================================

/// Message and code pulled out of an error body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrorDetail {
    pub message: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detail {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        code: Option<Value>,
    },
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Nested {
        error: ErrorField,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        code: Option<Value>,
    },
    Flat {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        code: Option<Value>,
    },
}

/// Best-effort extraction of `error.message`/`error.code`, falling back to
/// top-level `message`/`code`.
///
/// Never fails: an unparseable or unexpected body yields an empty detail and
/// the caller uses its generic message.
pub fn parse_error_body(bytes: &[u8]) -> ServerErrorDetail {
    let Ok(body) = serde_json::from_slice::<ErrorBody>(bytes) else {
        return ServerErrorDetail::default();
    };

    match body {
        ErrorBody::Nested {
            error: ErrorField::Detail { message, code },
            message: top_message,
            code: top_code,
        } => ServerErrorDetail {
            message: non_blank(message).or_else(|| non_blank(top_message)),
            code: code.and_then(code_to_string).or_else(|| top_code.and_then(code_to_string)),
        },
        ErrorBody::Nested {
            error: ErrorField::Text(text),
            message,
            code,
        } => ServerErrorDetail {
            message: non_blank(message).or_else(|| non_blank(Some(text))),
            code: code.and_then(code_to_string),
        },
        ErrorBody::Flat { message, code } => ServerErrorDetail {
            message: non_blank(message),
            code: code.and_then(code_to_string),
        },
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn code_to_string(code: Value) -> Option<String> {
    match code {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
