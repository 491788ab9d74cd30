use tone_core::config::env::{API_KEY_ENV, MODEL_ENV};
use tone_core::config::paths::{CONFIG_DIR_ENV, PathSource};
use tone_core::config::{AppPaths, EnvDefaults};

use serial_test::serial;
use std::env;
use tempfile::TempDir;

// ============================================================================
// Environment-dependent tests. Serialized because they mutate process env.
// ============================================================================

#[test]
#[serial]
fn given_override_dir_when_resolved_then_logs_nested_under_it() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let paths = AppPaths::resolve(Some(dir.path())).unwrap();

    // THEN
    assert_eq!(paths.source, PathSource::Override);
    assert_eq!(paths.config_dir, dir.path());
    assert_eq!(paths.log_dir, dir.path().join("logs"));
}

#[test]
#[serial]
fn given_config_dir_env_when_resolved_without_override_then_env_used() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    // SAFETY: serialized with every other env-mutating test
    unsafe { env::set_var(CONFIG_DIR_ENV, dir.path()) };

    // WHEN
    let paths = AppPaths::resolve(None);

    // THEN
    unsafe { env::remove_var(CONFIG_DIR_ENV) };
    let paths = paths.unwrap();
    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.config_dir, dir.path());
}

/// **VALUE**: Verifies environment defaults are read and blank values ignored.
///
/// **BUG THIS CATCHES**: Would catch a blank MISTRAL_API_KEY being treated as a
/// configured key, which would hide the credential-entry screen.
#[test]
#[serial]
fn given_env_vars_when_loaded_then_key_and_model_picked_up() {
    // GIVEN
    // SAFETY: serialized with every other env-mutating test
    unsafe {
        env::set_var(API_KEY_ENV, "  env-key-456 ");
        env::set_var(MODEL_ENV, "   ");
    }

    // WHEN
    let defaults = EnvDefaults::load();

    // THEN
    unsafe {
        env::remove_var(API_KEY_ENV);
        env::remove_var(MODEL_ENV);
    }
    assert_eq!(
        defaults.api_key.as_ref().map(|k| k.expose()),
        Some("env-key-456")
    );
    assert_eq!(defaults.model, None);
    assert!(!format!("{defaults:?}").contains("env-key-456"));
}
