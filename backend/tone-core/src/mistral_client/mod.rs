//! Single-shot tone adjustment against the chat-completion endpoint.
//!
//! Every round trip ends as an [`AdjustmentOutcome`]: the rewritten text, or
//! an [`AdjustmentError`] that already carries the message to show the user.
//! Transport and parse faults never escape as anything else.

pub mod wire;

use crate::config::{ApiConfig, MAX_REQUEST_TIMEOUT_MS};
use crate::error::{AdjustmentError, ConfigError};
use crate::validation::preview;

use common::{Credential, ErrorLocation};

use wire::{ChatCompletionRequest, ChatCompletionResponse, build_system_prompt, parse_error_body};

use std::panic::Location;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;
use uuid::Uuid;

/// Result of one adjustment round trip.
pub type AdjustmentOutcome = Result<String, AdjustmentError>;

/// One tone-adjustment call. Built fresh per request, never retained.
#[derive(Debug)]
pub struct AdjustmentRequest<'a> {
    pub request_id: Uuid,
    pub text: &'a str,
    pub tone: &'a str,
    pub model: Option<&'a str>,
    pub credential: &'a Credential,
}

impl<'a> AdjustmentRequest<'a> {
    pub fn new(text: &'a str, tone: &'a str, credential: &'a Credential) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            text,
            tone,
            model: None,
            credential,
        }
    }

    pub fn with_model(mut self, model: Option<&'a str>) -> Self {
        self.model = model.filter(|m| !m.trim().is_empty());
        self
    }
}

#[derive(Clone)]
pub struct MistralClient {
    endpoint: Url,
    default_model: String,
    timeout: Duration,
    client: Client,
}

impl MistralClient {
    /// Build a client from the `[api]` config section.
    ///
    /// The timeout covers the whole exchange (connect, send, body read); on
    /// expiry the request is dropped and reported as a timeout. It must lie
    /// in `1..=MAX_REQUEST_TIMEOUT_MS`, whoever built the config.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        if config.request_timeout_ms == 0 || config.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Request timeout {}ms outside 1..={}ms",
                    config.request_timeout_ms, MAX_REQUEST_TIMEOUT_MS
                ),
            });
        }

        let endpoint = Url::parse(&config.base_url).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid base URL {}: {e}", config.base_url),
        })?;

        let timeout = config.request_timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            endpoint,
            default_model: config.default_model.clone(),
            timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Rewrite `text` in `tone`.
    ///
    /// Blank credential or text short-circuits before any network I/O.
    pub async fn adjust_tone(
        &self,
        text: &str,
        tone: &str,
        credential: &Credential,
        model_override: Option<&str>,
    ) -> AdjustmentOutcome {
        let request = AdjustmentRequest::new(text, tone, credential).with_model(model_override);
        self.send(&request).await
    }

    pub async fn send(&self, request: &AdjustmentRequest<'_>) -> AdjustmentOutcome {
        if request.credential.expose().trim().is_empty() {
            return Err(AdjustmentError::no_credential());
        }

        if request.text.trim().is_empty() {
            return Err(AdjustmentError::no_text());
        }

        let model = request.model.unwrap_or(self.default_model.as_str());
        let system_prompt = build_system_prompt(request.tone);
        let body = ChatCompletionRequest::tone_adjustment(model, &system_prompt, request.text);

        debug!(
            "[{}] Adjusting {} chars to '{}' with model {}: {:?}",
            request.request_id,
            request.text.len(),
            request.tone,
            model,
            preview(request.text)
        );

        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", request.credential.expose()))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let error = AdjustmentError::from_reqwest(&e, self.timeout);
                warn!(
                    "[{}] Request failed ({}): {}",
                    request.request_id,
                    error.error_category(),
                    e
                );
                error
            })?;

        let status = response.status();

        // Read the body under the same client timeout; a stall here is still a timeout.
        let bytes = response.bytes().await.map_err(|e| {
            let error = AdjustmentError::from_reqwest(&e, self.timeout);
            warn!(
                "[{}] Reading response body failed ({}): {}",
                request.request_id,
                error.error_category(),
                e
            );
            error
        })?;

        if !status.is_success() {
            let detail = parse_error_body(&bytes);
            let error = AdjustmentError::server_rejected(status.as_u16(), detail.message, detail.code);
            warn!(
                "[{}] Endpoint rejected request: HTTP {} ({}) code={:?}",
                request.request_id,
                status.as_u16(),
                error.error_category(),
                error.server_code()
            );
            return Err(error);
        }

        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("[{}] Success body is not valid JSON: {}", request.request_id, e);
            AdjustmentError::malformed(format!("body is not a chat completion: {e}"))
        })?;

        let content = parsed.first_content().ok_or_else(|| {
            warn!(
                "[{}] Success body has no completion content ({} choices)",
                request.request_id,
                parsed.choices.len()
            );
            AdjustmentError::malformed("first choice has no message content")
        })?;

        let adjusted = content.trim().to_string();

        match parsed.usage {
            Some(usage) => info!(
                "[{}] Tone adjusted to '{}' in {:?} ({} chars, {} tokens)",
                request.request_id,
                request.tone,
                started.elapsed(),
                adjusted.len(),
                usage.total_tokens
            ),
            None => info!(
                "[{}] Tone adjusted to '{}' in {:?} ({} chars)",
                request.request_id,
                request.tone,
                started.elapsed(),
                adjusted.len()
            ),
        }

        Ok(adjusted)
    }
}
