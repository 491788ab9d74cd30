// Unit tests for CredentialStore

use super::BrokenStore;
use crate::persistence::{API_KEY_STORAGE_KEY, MemoryStore, PreferenceStore};
use crate::state::CredentialStore;
use crate::state::credential::CredentialSource;

use std::sync::Arc;

#[test]
fn given_empty_store_when_loaded_then_no_credential() {
    let store = Arc::new(MemoryStore::new());

    let credentials = CredentialStore::load(store, None);

    assert!(!credentials.has_credential());
    assert_eq!(credentials.get().expose(), "");
    assert_eq!(credentials.source(), CredentialSource::None);
}

/// **VALUE**: Verifies a set credential is readable and persisted.
///
/// **BUG THIS CATCHES**: Would catch an in-memory-only update that loses the
/// key on the next launch.
#[test]
fn given_new_key_when_set_then_readable_and_persisted() {
    let store = Arc::new(MemoryStore::new());
    let mut credentials = CredentialStore::load(store.clone(), None);

    credentials.set("abc123").expect("set should succeed");

    assert!(credentials.has_credential());
    assert_eq!(credentials.get().expose(), "abc123");
    assert_eq!(credentials.source(), CredentialSource::Entered);
    assert_eq!(
        store.load(API_KEY_STORAGE_KEY).unwrap().as_deref(),
        Some("abc123")
    );
}

#[test]
fn given_stored_key_when_set_blank_then_cleared_everywhere() {
    let store = Arc::new(MemoryStore::new());
    let mut credentials = CredentialStore::load(store.clone(), None);
    credentials.set("abc123").unwrap();

    credentials.set("   ").expect("blank set should clear");

    assert!(!credentials.has_credential());
    assert_eq!(store.load(API_KEY_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies the credential survives a restart through the store.
#[test]
fn given_persisted_key_when_reloaded_then_restored() {
    let store = Arc::new(MemoryStore::new());
    CredentialStore::load(store.clone(), None)
        .set("  persisted-key-123 ")
        .unwrap();

    let reloaded = CredentialStore::load(store, None);

    assert_eq!(reloaded.get().expose(), "persisted-key-123");
    assert_eq!(reloaded.source(), CredentialSource::Persisted);
}

/// **VALUE**: Verifies a configured default takes precedence over a stored key.
///
/// **WHY THIS MATTERS**: Deployments that set the key in the environment expect
/// that key to be used even if a user once saved a different one.
#[test]
fn given_configured_and_persisted_keys_when_loaded_then_configured_wins() {
    let store = Arc::new(MemoryStore::new());
    store.save(API_KEY_STORAGE_KEY, "old-saved-key").unwrap();

    let credentials = CredentialStore::load(store, Some("env-key-456"));

    assert_eq!(credentials.get().expose(), "env-key-456");
    assert_eq!(credentials.source(), CredentialSource::Configured);
}

#[test]
fn given_blank_configured_key_when_loaded_then_falls_back_to_persisted() {
    let store = Arc::new(MemoryStore::new());
    store.save(API_KEY_STORAGE_KEY, "saved-key").unwrap();

    let credentials = CredentialStore::load(store, Some("  "));

    assert_eq!(credentials.get().expose(), "saved-key");
}

/// **VALUE**: Verifies a failing store degrades to "no credential" at startup
/// but surfaces the error on write.
///
/// **BUG THIS CATCHES**: Would catch the in-memory value being updated even
/// though persisting it failed.
#[test]
fn given_broken_store_when_loading_and_setting_then_read_ignored_write_reported() {
    let mut credentials = CredentialStore::load(Arc::new(BrokenStore), None);
    assert!(!credentials.has_credential());

    let result = credentials.set("abc123");

    assert!(result.is_err());
    assert!(!credentials.has_credential());
}

#[test]
fn given_each_source_when_displayed_then_readable_label() {
    assert_eq!(CredentialSource::Configured.to_string(), "environment");
    assert_eq!(CredentialSource::Persisted.to_string(), "saved preferences");
    assert_eq!(CredentialSource::Entered.to_string(), "entered this session");
    assert_eq!(CredentialSource::None.to_string(), "none");
}
