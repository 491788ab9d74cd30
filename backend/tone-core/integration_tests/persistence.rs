use tone_core::persistence::{API_KEY_STORAGE_KEY, LAST_TONE_STORAGE_KEY};
use tone_core::{CredentialStore, FileStore, PreferenceStore, ToneState};

use std::sync::Arc;
use tempfile::TempDir;

/// **VALUE**: Verifies credential and tone survive a simulated restart.
///
/// **WHY THIS MATTERS**: Users paste the key once; having to paste it again on
/// every launch is the most visible persistence failure.
///
/// **BUG THIS CATCHES**: Would catch writes that only update the in-memory cache.
#[test]
fn given_saved_preferences_when_store_reopened_then_values_restored() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    {
        let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        CredentialStore::load(store.clone(), None)
            .set("abc123")
            .unwrap();
        ToneState::load(store).set_tone("playful").unwrap();
    }

    // WHEN: A new process opens the same directory
    let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::open(dir.path()).unwrap());

    // THEN
    assert_eq!(CredentialStore::load(store.clone(), None).get().expose(), "abc123");
    assert_eq!(ToneState::load(store).selected(), "playful");
    assert!(!dir.path().join("preferences.json.tmp").exists());
}

#[test]
fn given_deleted_key_when_store_reopened_then_key_absent() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.save(API_KEY_STORAGE_KEY, "abc123").unwrap();
    store.save(LAST_TONE_STORAGE_KEY, "formal").unwrap();

    // WHEN
    store.delete(API_KEY_STORAGE_KEY).unwrap();
    store.delete("never-written").unwrap();
    let reopened = FileStore::open(dir.path()).unwrap();

    // THEN
    assert_eq!(reopened.load(API_KEY_STORAGE_KEY).unwrap(), None);
    assert_eq!(
        reopened.load(LAST_TONE_STORAGE_KEY).unwrap().as_deref(),
        Some("formal")
    );
}

#[test]
fn given_missing_directory_when_first_save_then_directory_created() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("not").join("yet");
    let store = FileStore::open(&nested).unwrap();

    // WHEN
    store.save(LAST_TONE_STORAGE_KEY, "concise").unwrap();

    // THEN
    assert!(store.path().exists());
}

#[test]
fn given_corrupt_preferences_file_when_opened_then_parse_error() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("preferences.json"), "{ not json").unwrap();

    // WHEN
    let result = FileStore::open(dir.path());

    // THEN
    assert!(result.is_err());
}
