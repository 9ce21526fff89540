//! Tests for config module

use dancecenter::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_file_exists() {
    let config_path = std::path::Path::new("config.toml");
    assert!(
        config_path.exists(),
        "config.toml should exist in project root"
    );
}

#[test]
fn test_config_toml_loads_and_validates() {
    let config = Config::from_file(std::path::Path::new("config.toml"))
        .expect("config.toml should parse");
    assert!(config.validate().is_ok());
    assert_eq!(config.api.base_url, "http://localhost:8080/api");
    assert_eq!(config.notifications.schedule_create_error_ms, 6000);
    assert_eq!(config.notifications.schedule_update_error_ms, 7000);
    assert_eq!(config.i18n.locale, "en");
}

#[test]
fn test_partial_file_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[api]
base_url = "https://studio.example.com/api"
request_timeout_secs = 10
user_agent = "test-agent"

[i18n]
locale = "ru"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.api.base_url, "https://studio.example.com/api");
    assert_eq!(config.api.request_timeout_secs, 10);
    assert_eq!(config.i18n.locale, "ru");
    assert_eq!(config.notifications.success_ms, 3000);
    assert_eq!(config.logging.format, "text");
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_toml_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[api\nbase_url = ").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML config file"));
}

#[test]
fn test_missing_file_is_reported() {
    let err = Config::from_file(std::path::Path::new("does/not/exist.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_bad_log_format_rejected() {
    let mut config = Config::default();
    config.logging.format = String::from("xml");
    assert!(config.validate().is_err());
}
