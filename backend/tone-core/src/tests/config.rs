// Unit tests for AppConfig loading, saving and validation

use crate::config::{AppConfig, EnvDefaults, MAX_REQUEST_TIMEOUT_MS};
use crate::error::ConfigError;
use crate::{DEFAULT_MODEL, MISTRAL_CHAT_COMPLETIONS_URL};

use tempfile::TempDir;

#[test]
fn given_missing_file_when_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = AppConfig::load(dir.path()).expect("missing file is not an error");

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.api.base_url, MISTRAL_CHAT_COMPLETIONS_URL);
    assert_eq!(config.api.default_model, DEFAULT_MODEL);
    assert_eq!(config.api.request_timeout_ms, MAX_REQUEST_TIMEOUT_MS);
    assert!(config.ui.initial_text.starts_with("Hey there"));
}

/// **VALUE**: Verifies a saved config loads back identically.
///
/// **BUG THIS CATCHES**: Would catch a serde rename or missing default that
/// silently drops a user setting on the next launch.
#[test]
fn given_customized_config_when_saved_and_loaded_then_identical() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.api.default_model = "mistral-large-latest".to_string();
    config.api.request_timeout_ms = 5_000;
    config.ui.initial_text = "Quarterly numbers are in.".to_string();

    config.save(dir.path()).expect("save should succeed");
    let loaded = AppConfig::load(dir.path()).expect("load should succeed");

    assert_eq!(loaded, config);
    assert!(!dir.path().join("tonecraft.toml.tmp").exists());
}

#[test]
fn given_partial_file_when_loaded_then_missing_fields_defaulted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tonecraft.toml"),
        "[api]\ndefault_model = \"open-mistral-nemo\"\n",
    )
    .unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.api.default_model, "open-mistral-nemo");
    assert_eq!(config.api.base_url, MISTRAL_CHAT_COMPLETIONS_URL);
    assert_eq!(config.version, 1);
}

#[test]
fn given_corrupt_file_when_loaded_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tonecraft.toml"), "[api\nbroken").unwrap();

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies out-of-range values are rejected.
///
/// **WHY THIS MATTERS**: A timeout above the hard ceiling, or a non-HTTP base
/// URL, would break the round-trip guarantees of the completion client.
#[test]
fn given_invalid_values_when_validated_then_rejected() {
    let mut too_slow = AppConfig::default();
    too_slow.api.request_timeout_ms = MAX_REQUEST_TIMEOUT_MS + 1;

    let mut zero_timeout = AppConfig::default();
    zero_timeout.api.request_timeout_ms = 0;

    let mut bad_url = AppConfig::default();
    bad_url.api.base_url = "ftp://api.example.com".to_string();

    let mut blank_model = AppConfig::default();
    blank_model.api.default_model = "  ".to_string();

    for config in [too_slow, zero_timeout, bad_url, blank_model] {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "expected rejection for {config:?}"
        );
    }
}

#[test]
fn given_env_model_when_applied_then_overrides_file_model() {
    let env = EnvDefaults {
        model: Some("mistral-medium-latest".to_string()),
        ..EnvDefaults::default()
    };

    let config = AppConfig::default().with_env(&env);
    let untouched = AppConfig::default().with_env(&EnvDefaults::default());

    assert_eq!(config.api.default_model, "mistral-medium-latest");
    assert_eq!(untouched.api.default_model, DEFAULT_MODEL);
}

/// **VALUE**: Verifies the first launch leaves an editable config behind.
///
/// **BUG THIS CATCHES**: Would catch a later launch overwriting a file the
/// user already customized.
#[test]
fn given_no_file_when_loaded_or_created_then_defaults_written_once() {
    // GIVEN
    let dir = TempDir::new().unwrap();

    // WHEN
    let first = AppConfig::load_or_create(dir.path()).expect("first launch");

    // THEN
    assert_eq!(first, AppConfig::default());
    assert!(dir.path().join("tonecraft.toml").exists());

    // AND: A customized file is loaded, not replaced
    let mut customized = AppConfig::default();
    customized.api.request_timeout_ms = 8_000;
    customized.save(dir.path()).unwrap();
    let second = AppConfig::load_or_create(dir.path()).unwrap();
    assert_eq!(second.api.request_timeout_ms, 8_000);
}

#[test]
fn given_unwritable_dir_when_loaded_or_created_then_defaults_returned() {
    // GIVEN: A regular file where the config directory should be
    let dir = TempDir::new().unwrap();
    let blocked = dir.path().join("not-a-dir");
    std::fs::write(&blocked, "x").unwrap();

    // WHEN
    let config = AppConfig::load_or_create(&blocked);

    // THEN
    assert_eq!(config.unwrap(), AppConfig::default());
}
