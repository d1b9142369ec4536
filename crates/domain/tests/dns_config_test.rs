use ferrous_stub_domain::{CliOverrides, ClientConfig, Config, ConfigError};
use std::io::Write;

mod helpers;
use helpers::ConfigTomlBuilder;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.upstream.server, "1.1.1.1:53");
    assert!(config.upstream.tcp_server.is_none());
    assert_eq!(config.client.max_attempts, 5);
    assert_eq!(config.client.timeout_ms, 250);
    assert_eq!(config.client.poll_interval_ms, 10);
    assert!(config.client.tcp_fallback);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_toml_partial_sections() {
    let toml = ConfigTomlBuilder::new()
        .upstream("9.9.9.9:53")
        .client(3, 500)
        .build();

    let config = Config::from_toml(&toml).unwrap();

    assert_eq!(config.upstream.server, "9.9.9.9:53");
    assert_eq!(config.client.max_attempts, 3);
    assert_eq!(config.client.timeout_ms, 500);
    assert_eq!(config.client.poll_interval_ms, 10);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_from_empty_toml_uses_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_invalid_toml() {
    let result = Config::from_toml("[client]\nmax_attempts = \"many\"");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_attempts() {
    let mut config = Config::default();
    config.client = ClientConfig {
        max_attempts: 0,
        ..ClientConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_poll_interval() {
    let mut config = Config::default();
    config.client.poll_interval_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_server_address() {
    let mut config = Config::default();
    config.upstream.server = "not-an-address".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_tcp_server_override_parses() {
    let mut config = Config::default();
    config.upstream.tcp_server = Some("127.0.0.1:5353".to_string());

    let addr = config.upstream.tcp_server_addr().unwrap();
    assert_eq!(addr, Some("127.0.0.1:5353".parse().unwrap()));
}

#[test]
fn test_load_from_file_with_overrides() {
    let toml = ConfigTomlBuilder::new()
        .upstream("8.8.8.8:53")
        .logging("warn")
        .build();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let overrides = CliOverrides {
        max_attempts: Some(2),
        no_tcp_fallback: true,
        log_level: Some("debug".to_string()),
        ..CliOverrides::default()
    };

    let config = Config::load(Some(&path), overrides).unwrap();

    assert_eq!(config.upstream.server, "8.8.8.8:53");
    assert_eq!(config.client.max_attempts, 2);
    assert!(!config.client.tcp_fallback);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_missing_file() {
    let result = Config::load(Some("/nonexistent/ferrous-stub.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}
