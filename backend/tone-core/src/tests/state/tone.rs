// Unit tests for ToneState

use super::BrokenStore;
use crate::DEFAULT_TONE;
use crate::persistence::{LAST_TONE_STORAGE_KEY, MemoryStore, PreferenceStore};
use crate::state::ToneState;

use std::sync::Arc;

#[test]
fn given_nothing_persisted_when_loaded_then_default_tone() {
    let tone = ToneState::load(Arc::new(MemoryStore::new()));

    assert_eq!(tone.selected(), DEFAULT_TONE);
}

/// **VALUE**: Verifies the selected tone survives a restart.
#[test]
fn given_tone_set_when_reloaded_then_same_tone() {
    let store = Arc::new(MemoryStore::new());
    ToneState::load(store.clone()).set_tone("playful").unwrap();

    let reloaded = ToneState::load(store);

    assert_eq!(reloaded.selected(), "playful");
}

#[test]
fn given_selection_when_reset_then_default_persisted() {
    let store = Arc::new(MemoryStore::new());
    let mut tone = ToneState::load(store.clone());
    tone.set_tone("formal").unwrap();

    tone.reset().unwrap();

    assert_eq!(tone.selected(), DEFAULT_TONE);
    assert_eq!(
        store.load(LAST_TONE_STORAGE_KEY).unwrap().as_deref(),
        Some(DEFAULT_TONE)
    );
}

/// **VALUE**: Verifies a blank or unreadable persisted value falls back to the default.
///
/// **BUG THIS CATCHES**: Would catch an empty tone id reaching the prompt builder.
#[test]
fn given_blank_or_unreadable_persisted_tone_when_loaded_then_default() {
    let store = Arc::new(MemoryStore::new());
    store.save(LAST_TONE_STORAGE_KEY, "  ").unwrap();

    assert_eq!(ToneState::load(store).selected(), DEFAULT_TONE);
    assert_eq!(ToneState::load(Arc::new(BrokenStore)).selected(), DEFAULT_TONE);
}
