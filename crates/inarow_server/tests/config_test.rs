//! Tests for loading server configuration.

use inarow_server::ServerConfig;
use std::io::Write;
use std::time::Duration;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Temp file");
    file.write_all(content.as_bytes()).expect("Write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(config.reconnect_grace(), Duration::from_secs(5));
    assert_eq!(*config.max_username_len(), 32);
    assert_eq!(config.start_timeout(), None);
    assert_eq!(config.bind_address(), "127.0.0.1:3000");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config("port = 8080\nstart_timeout_secs = 60\n");
    let config = ServerConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(*config.port(), 8080);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.start_timeout(), Some(Duration::from_secs(60)));
    assert_eq!(*config.reconnect_grace_ms(), 5000);
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 9000
reconnect_grace_ms = 250
max_username_len = 12
"#,
    );
    let config = ServerConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(config.bind_address(), "0.0.0.0:9000");
    assert_eq!(config.reconnect_grace(), Duration::from_millis(250));
    assert_eq!(*config.max_username_len(), 12);
}

#[test]
fn test_malformed_file_rejected() {
    let file = write_config("port = \"not a number\"\n");
    let err = ServerConfig::from_file(file.path()).expect_err("Bad type");
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_zero_username_limit_rejected() {
    let file = write_config("max_username_len = 0\n");
    let err = ServerConfig::from_file(file.path()).expect_err("Invalid limit");
    assert_eq!(err.message, "max_username_len must be at least 1");
}

#[test]
fn test_missing_file_rejected() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = ServerConfig::from_file(dir.path().join("absent.toml")).expect_err("No file");
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_load_without_path_uses_defaults() {
    assert_eq!(ServerConfig::load(None).expect("Defaults"), ServerConfig::default());
}

#[test]
fn test_overrides_apply() {
    let config = ServerConfig::default().with_overrides(Some("0.0.0.0".into()), None);
    assert_eq!(config.bind_address(), "0.0.0.0:3000");
    let config = config.with_overrides(None, Some(4000));
    assert_eq!(config.bind_address(), "0.0.0.0:4000");
}
