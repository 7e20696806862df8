//! Configuration module for the admin console.

use serde::Deserialize;
use std::path::Path;

use crate::{AdminError, Result};

/// Backend service endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the identity/auth service.
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    /// Base URL of the membership service.
    #[serde(default = "default_member_base_url")]
    pub member_base_url: String,
    /// Base URL of the board/post service.
    #[serde(default = "default_board_base_url")]
    pub board_base_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_auth_base_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_member_base_url() -> String {
    "http://127.0.0.1:8082".to_string()
}

fn default_board_base_url() -> String {
    "http://127.0.0.1:8083".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_connect_timeout() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_base_url: default_auth_base_url(),
            member_base_url: default_member_base_url(),
            board_base_url: default_board_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path of the local storage file holding the persisted sessions.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_storage_path() -> String {
    "data/session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

/// Login form configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Accept the literal login id `admin` in place of an email address.
    #[serde(default = "default_allow_admin_id")]
    pub allow_admin_id: bool,
}

fn default_allow_admin_id() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_admin_id: default_allow_admin_id(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Rows per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Timezone for displaying timestamps (e.g., "Asia/Seoul", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_page_size() -> u32 {
    10
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timezone: default_timezone(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Language code (ko / en).
    #[serde(default = "default_language")]
    pub language: String,
    /// Directory with locale overrides (`{language}.toml`).
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_locales_dir() -> String {
    "locales".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            locales_dir: default_locales_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/msa-admin.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Backend endpoints.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence.
    #[serde(default)]
    pub session: SessionConfig,
    /// Login form behavior.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Display settings.
    #[serde(default)]
    pub ui: UiConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AdminError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AdminError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MSA_ADMIN_API_BASE`: identity/auth service base URL
    /// - `MSA_ADMIN_MEMBER_API_BASE`: membership service base URL
    /// - `MSA_ADMIN_BOARD_API_BASE`: board service base URL
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 3] = [
            ("MSA_ADMIN_API_BASE", &mut self.api.auth_base_url),
            ("MSA_ADMIN_MEMBER_API_BASE", &mut self.api.member_base_url),
            ("MSA_ADMIN_BOARD_API_BASE", &mut self.api.board_base_url),
        ];
        for (name, target) in overrides {
            if let Ok(value) = std::env::var(name) {
                if !value.is_empty() {
                    *target = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - a base URL is not an absolute http(s) URL
    /// - the page size is zero
    /// - the timezone is unknown
    pub fn validate(&self) -> Result<()> {
        for (name, base) in [
            ("api.auth_base_url", &self.api.auth_base_url),
            ("api.member_base_url", &self.api.member_base_url),
            ("api.board_base_url", &self.api.board_base_url),
        ] {
            // A bare host:port is accepted and used as http.
            let base = if base.contains("://") {
                base.trim().to_string()
            } else {
                format!("http://{}", base.trim())
            };
            let parsed = url::Url::parse(&base)
                .map_err(|e| AdminError::Config(format!("{name} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AdminError::Config(format!(
                    "{name} must use http or https, got {}",
                    parsed.scheme()
                )));
            }
        }
        if self.ui.page_size == 0 {
            return Err(AdminError::Config(
                "ui.page_size must be greater than zero".to_string(),
            ));
        }
        if self.ui.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(AdminError::Config(format!(
                "ui.timezone is unknown: {}",
                self.ui.timezone
            )));
        }
        Ok(())
    }
}
