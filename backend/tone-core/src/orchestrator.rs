//! Tone adjustment use case.
//!
//! Turns a tone selection into one validated completion call and, on
//! success, one update of the working text.
//!
//! # Concurrency
//!
//! The orchestrator is `Clone`; clones share the same session and in-flight
//! flag. At most one adjustment runs at a time: the flag is claimed with a
//! compare-exchange and released by a drop guard, and an overlapping call is
//! rejected with [`AdjustmentError::Busy`] before touching any state.
//! Session writes happen only after the remote call settles.
//!
//! Edits check the flag while holding the session write lock. An adjustment
//! snapshots its input under that same lock, so an accepted edit is always
//! either part of the request or rejected as busy.

use crate::error::{AdjustmentError, CoreError, StoreError};
use crate::mistral_client::{AdjustmentOutcome, AdjustmentRequest, MistralClient};
use crate::state::{CredentialStore, TextState, ToneState};
use crate::tones::find_tone;
use crate::validation::{format_tone_name, sanitize_text};

use common::Credential;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, warn};
use tokio::sync::{RwLock, mpsc};

pub const TONE_ADJUSTED_TITLE: &str = "Tone adjusted successfully";
pub const ADJUSTMENT_FAILED_TITLE: &str = "Error adjusting tone";
pub const API_KEY_SAVED_MESSAGE: &str = "API key saved successfully";
pub const TEXT_RESET_MESSAGE: &str = "Text has been reset to original";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentStatus {
    Idle,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// Transient user-facing message (rendered as a toast/status line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn new(level: NotificationLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Success message for a finished adjustment.
pub fn tone_adjusted_message(tone: &str) -> String {
    format!("Text has been adjusted to {tone} tone.")
}

/// Everything the screens read and the orchestrator writes.
pub struct Session {
    pub credential: CredentialStore,
    pub text: TextState,
    pub tone: ToneState,
    /// Message of the last failed adjustment, shown on the credential screen.
    pub last_error: Option<String>,
}

impl Session {
    pub fn new(credential: CredentialStore, text: TextState, tone: ToneState) -> Self {
        Self {
            credential,
            text,
            tone,
            last_error: None,
        }
    }
}

/// Owned copy of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub original: String,
    pub current: String,
    pub has_changes: bool,
    pub selected_tone: String,
    pub has_credential: bool,
    pub last_error: Option<String>,
    pub status: AdjustmentStatus,
}

/// Releases the in-flight flag when the adjustment settles, including on
/// early return or cancellation of the future.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct AdjustmentOrchestrator {
    client: MistralClient,
    model_override: Option<String>,
    session: Arc<RwLock<Session>>,
    in_flight: Arc<AtomicBool>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl AdjustmentOrchestrator {
    /// Create an orchestrator and the receiving end of its notifications.
    pub fn new(
        client: MistralClient,
        session: Session,
        model_override: Option<String>,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notifications, notification_rx) = mpsc::unbounded_channel();
        let orchestrator = Self {
            client,
            model_override: model_override.filter(|m| !m.trim().is_empty()),
            session: Arc::new(RwLock::new(session)),
            in_flight: Arc::new(AtomicBool::new(false)),
            notifications,
        };
        (orchestrator, notification_rx)
    }

    pub fn status(&self) -> AdjustmentStatus {
        if self.in_flight.load(Ordering::Acquire) {
            AdjustmentStatus::InFlight
        } else {
            AdjustmentStatus::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status() == AdjustmentStatus::InFlight
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.read().await;
        SessionSnapshot {
            original: session.text.original().to_string(),
            current: session.text.current().to_string(),
            has_changes: session.text.has_changes(),
            selected_tone: session.tone.selected().to_string(),
            has_credential: session.credential.has_credential(),
            last_error: session.last_error.clone(),
            status: self.status(),
        }
    }

    pub async fn has_credential(&self) -> bool {
        self.session.read().await.credential.has_credential()
    }

    pub async fn last_error(&self) -> Option<String> {
        self.session.read().await.last_error.clone()
    }

    pub async fn clear_error(&self) {
        self.session.write().await.last_error = None;
    }

    /// Adjust the working text to `tone` without changing the selected tone.
    pub async fn request_adjustment(&self, tone: &str) -> AdjustmentOutcome {
        self.run_adjustment(tone, false).await
    }

    /// Persist `tone` as the selection, then adjust the working text to it.
    pub async fn select_tone(&self, tone: &str) -> AdjustmentOutcome {
        self.run_adjustment(tone, true).await
    }

    async fn run_adjustment(&self, tone: &str, persist_selection: bool) -> AdjustmentOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Adjustment to '{}' rejected: another request is in flight", tone);
            let error = AdjustmentError::busy();
            self.notify(Notification::new(
                NotificationLevel::Info,
                "Please wait",
                error.user_message(),
            ));
            return Err(error);
        };

        if find_tone(tone).is_none() {
            let error = AdjustmentError::invalid_tone(tone);
            warn!("Rejected unknown tone '{}'", tone);
            self.settle_failure(&error).await;
            return Err(error);
        }

        // Snapshot the inputs and clear the previous error in one critical section.
        let (text, credential) = {
            let mut session = self.session.write().await;
            if persist_selection {
                if let Err(e) = session.tone.set_tone(tone) {
                    // The adjustment itself does not depend on the persisted choice.
                    warn!("Failed to persist selected tone '{}': {}", tone, e);
                }
            }
            session.last_error = None;
            (
                session.text.current().to_string(),
                session.credential.get().clone(),
            )
        };

        let outcome = self.call_client(&text, tone, &credential).await;

        match &outcome {
            Ok(adjusted) => {
                self.session.write().await.text.set_current(adjusted.as_str());
                self.notify(Notification::new(
                    NotificationLevel::Success,
                    TONE_ADJUSTED_TITLE,
                    tone_adjusted_message(tone),
                ));
            }
            Err(e) => self.settle_failure(e).await,
        }

        outcome
    }

    async fn call_client(&self, text: &str, tone: &str, credential: &Credential) -> AdjustmentOutcome {
        let request = AdjustmentRequest::new(text, tone, credential)
            .with_model(self.model_override.as_deref());
        debug!("[{}] Dispatching adjustment to '{}'", request.request_id, tone);
        self.client.send(&request).await
    }

    async fn settle_failure(&self, error: &AdjustmentError) {
        let message = error.user_message();
        error!("Tone adjustment failed ({}): {}", error.error_category(), error);
        self.session.write().await.last_error = Some(message.clone());
        self.notify(Notification::new(
            NotificationLevel::Error,
            ADJUSTMENT_FAILED_TITLE,
            message,
        ));
    }

    /// Store a new credential; blank input clears it.
    pub async fn set_credential(&self, raw: &str) -> Result<(), StoreError> {
        let mut session = self.session.write().await;
        session.credential.set(raw)?;
        if session.credential.has_credential() {
            session.last_error = None;
            self.notify(Notification::new(
                NotificationLevel::Success,
                API_KEY_SAVED_MESSAGE,
                "",
            ));
        }
        Ok(())
    }

    pub async fn clear_credential(&self) -> Result<(), StoreError> {
        self.session.write().await.credential.clear()
    }

    /// User edit of the working copy.
    pub async fn edit_text(&self, text: &str) -> Result<(), CoreError> {
        let mut session = self.session.write().await;
        self.ensure_idle()?;
        session.text.set_current(text);
        Ok(())
    }

    /// Load new text as the original (both buffers replaced).
    pub async fn import_text(&self, text: &str) -> Result<(), CoreError> {
        let text = sanitize_text(text);
        let mut session = self.session.write().await;
        self.ensure_idle()?;
        info!("Imported {} chars as original text", text.len());
        session.text.set_original(text);
        Ok(())
    }

    /// Restore the original text and the default tone.
    ///
    /// The in-memory reset always completes; a failed write of the default
    /// tone is only logged.
    pub async fn reset(&self) -> Result<(), CoreError> {
        {
            let mut session = self.session.write().await;
            self.ensure_idle()?;
            session.text.reset();
            if let Err(e) = session.tone.reset() {
                warn!("Failed to persist default tone after reset: {}", e);
            }
        }
        self.notify(Notification::new(
            NotificationLevel::Info,
            TEXT_RESET_MESSAGE,
            "",
        ));
        Ok(())
    }

    #[track_caller]
    fn ensure_idle(&self) -> Result<(), AdjustmentError> {
        if self.is_loading() {
            return Err(AdjustmentError::busy());
        }
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("No notification listener attached");
        }
    }

    /// Display label for a tone id (catalog label, or a formatted fallback).
    pub fn tone_label(tone: &str) -> String {
        find_tone(tone)
            .map(|t| t.label.to_string())
            .unwrap_or_else(|| format_tone_name(tone))
    }
}
