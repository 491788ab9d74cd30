use crate::DEFAULT_TONE;
use crate::error::StoreError;
use crate::persistence::{LAST_TONE_STORAGE_KEY, PreferenceStore};

use std::sync::Arc;

use log::{debug, warn};

/// The selected tone identifier, persisted on every change.
///
/// Identifiers are not checked against the catalog here; the orchestrator
/// does that before anything reaches the completion endpoint.
pub struct ToneState {
    selected: String,
    store: Arc<dyn PreferenceStore>,
}

impl ToneState {
    /// Initialize from the persisted tone, falling back to the default.
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let selected = match store.load(LAST_TONE_STORAGE_KEY) {
            Ok(Some(tone)) if !tone.trim().is_empty() => {
                debug!("Restored last selected tone '{}'", tone);
                tone
            }
            Ok(_) => DEFAULT_TONE.to_string(),
            Err(e) => {
                warn!("Failed to read last selected tone, using default: {}", e);
                DEFAULT_TONE.to_string()
            }
        };

        Self { selected, store }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn set_tone(&mut self, id: &str) -> Result<(), StoreError> {
        self.selected = id.to_string();
        self.store.save(LAST_TONE_STORAGE_KEY, id)
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.set_tone(DEFAULT_TONE)
    }
}
