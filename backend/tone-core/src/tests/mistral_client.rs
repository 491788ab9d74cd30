// Unit tests for MistralClient construction

use crate::config::{ApiConfig, MAX_REQUEST_TIMEOUT_MS};
use crate::error::ConfigError;
use crate::mistral_client::MistralClient;

use std::time::Duration;

fn api_config(request_timeout_ms: u64) -> ApiConfig {
    ApiConfig {
        request_timeout_ms,
        ..ApiConfig::default()
    }
}

/// **VALUE**: Verifies the client refuses a timeout above the hard cap even
/// when the config never went through `AppConfig::validate`.
///
/// **WHY THIS MATTERS**: `ApiConfig` has public fields, so an embedder can
/// build one by hand. A request must never wait longer than 30 seconds.
///
/// **BUG THIS CATCHES**: Would catch the cap living only in the config loader
/// while `MistralClient::new` passes any duration straight to reqwest.
#[test]
fn given_timeout_above_cap_when_client_built_then_validation_error() {
    // GIVEN
    let config = api_config(120_000);

    // WHEN
    let result = MistralClient::new(&config);

    // THEN
    match result {
        Err(ConfigError::ValidationError { reason, .. }) => {
            assert!(reason.contains("120000"), "Got: {reason}");
        }
        Err(other) => panic!("Expected ValidationError, got {other}"),
        Ok(client) => panic!("Expected rejection, got timeout {:?}", client.timeout()),
    }
}

/// **BUG THIS CATCHES**: A zero timeout makes every request fail instantly
/// as a timeout, which the user cannot tell apart from a slow endpoint.
#[test]
fn given_zero_timeout_when_client_built_then_validation_error() {
    let result = MistralClient::new(&api_config(0));

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_timeouts_at_both_bounds_when_client_built_then_accepted() {
    let shortest = MistralClient::new(&api_config(1)).expect("1ms is in range");
    let longest =
        MistralClient::new(&api_config(MAX_REQUEST_TIMEOUT_MS)).expect("cap itself is in range");

    assert_eq!(shortest.timeout(), Duration::from_millis(1));
    assert_eq!(longest.timeout(), Duration::from_secs(30));
}
