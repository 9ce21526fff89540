//! Configuration management for the dancecenter client
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST backend configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Notification banner durations
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Language of user-facing messages
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL all resource paths are appended to
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Notification banner durations in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub success_ms: u64,
    pub warning_ms: u64,
    pub error_ms: u64,
    /// Schedule-item create failures stay longer
    pub schedule_create_error_ms: u64,
    /// Schedule-item update failures stay longest
    pub schedule_update_error_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

/// Localization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Language code (en, ru)
    pub locale: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/api"),
            request_timeout_secs: 30,
            user_agent: format!("dancecenter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ms: 3000,
            warning_ms: 4000,
            error_ms: 4000,
            schedule_create_error_ms: 6000,
            schedule_update_error_ms: 7000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: String::from("en"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ApiConfig::default();

        let base_url =
            std::env::var("DANCECENTER_API_URL").unwrap_or_else(|_| defaults.base_url.clone());

        let request_timeout_secs = std::env::var("DANCECENTER_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.request_timeout_secs);

        let user_agent = std::env::var("DANCECENTER_USER_AGENT").unwrap_or(defaults.user_agent);

        let level = std::env::var("DANCECENTER_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format =
            std::env::var("DANCECENTER_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        let locale = std::env::var("DANCECENTER_LANG").unwrap_or_else(|_| String::from("en"));

        Ok(Self {
            api: ApiConfig {
                base_url,
                request_timeout_secs,
                user_agent,
            },
            notifications: NotificationConfig::default(),
            logging: LoggingConfig { level, format },
            i18n: I18nConfig { locale },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url)
            .with_context(|| format!("api.base_url is not a valid URL: {}", self.api.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api.base_url must use http or https");
        }

        if self.api.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            notifications: NotificationConfig::default(),
            logging: LoggingConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}
