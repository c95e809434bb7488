//! 設定ファイル読み込みと認証情報の解決

use circuit_guard::common::gateway::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use circuit_guard::common::CredentialSource;
use circuit_guard::config::DEFAULT_API_KEY_ENV;
use circuit_guard::{CircuitGuardError, Config, ConfigCredentials};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config.api_key, None);
    assert_eq!(config.api_key_env, DEFAULT_API_KEY_ENV);
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.timeout(), Duration::from_secs(120));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "model": "gemini-2.5-pro", "timeout_seconds": 30 }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

    let gateway_config = config.gateway_config();
    assert_eq!(gateway_config.model, "gemini-2.5-pro");
    assert_eq!(gateway_config.endpoint, DEFAULT_ENDPOINT);
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, CircuitGuardError::Json(_)));
}

#[test]
fn test_file_key_used_when_env_unset() {
    let config = Config {
        api_key: Some("file-key".into()),
        api_key_env: "CIRCUIT_GUARD_CONFIG_TEST_UNSET_1".into(),
        ..Config::default()
    };
    assert_eq!(config.api_key().unwrap(), "file-key");
}

#[test]
fn test_missing_key_names_env_var() {
    let config = Config {
        api_key: Some("   ".into()),
        api_key_env: "CIRCUIT_GUARD_CONFIG_TEST_UNSET_2".into(),
        ..Config::default()
    };
    let err = config.api_key().unwrap_err();
    assert!(matches!(err, CircuitGuardError::MissingApiKey(ref var) if var == "CIRCUIT_GUARD_CONFIG_TEST_UNSET_2"));
    assert!(err.to_string().contains("CIRCUIT_GUARD_CONFIG_TEST_UNSET_2"));
}

#[test]
fn test_credentials_reread_environment_each_call() {
    let env_var = "CIRCUIT_GUARD_CONFIG_TEST_ROTATE_3";
    let config = Config {
        api_key: Some("file-key".into()),
        api_key_env: env_var.into(),
        ..Config::default()
    };
    let credentials = ConfigCredentials::from_config(&config);

    assert_eq!(credentials.api_key().as_deref(), Some("file-key"));

    std::env::set_var(env_var, "rotated-key");
    assert_eq!(credentials.api_key().as_deref(), Some("rotated-key"));

    std::env::set_var(env_var, "  ");
    assert_eq!(credentials.api_key().as_deref(), Some("file-key"));

    std::env::remove_var(env_var);
}
