//! Internationalization (i18n) module for the admin console.
//!
//! Language resources are TOML tables flattened into dot-separated keys.
//! Korean and English resources are compiled into the binary; a
//! `{locale}.toml` file in the configured locales directory overrides
//! individual messages.
//!
//! # Usage
//!
//! ```
//! use msa_admin::i18n::I18n;
//!
//! let i18n = I18n::builtin("en").unwrap();
//! assert_eq!(i18n.t("common.back"), "Back");
//!
//! let text = i18n.t_with("common.page_info", &[("page", "1"), ("total", "3")]);
//! assert_eq!(text, "Page 1 / 3");
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Default locale.
pub const DEFAULT_LOCALE: &str = "ko";

const BUILTIN_KO: &str = include_str!("../../locales/ko.toml");
const BUILTIN_EN: &str = include_str!("../../locales/en.toml");

/// I18n-related errors.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to read locale file.
    #[error("Failed to read locale file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse locale file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Locale not found.
    #[error("Locale not found: {0}")]
    LocaleNotFound(String),
}

/// Result type for i18n operations.
pub type Result<T> = std::result::Result<T, I18nError>;

/// Message catalog for one locale.
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current locale (e.g., "ko", "en").
    locale: String,
    /// Flattened message map (key -> value).
    messages: HashMap<String, String>,
}

impl I18n {
    /// Load a locale from `{locales_dir}/{locale}.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale file is missing, unreadable or not valid TOML.
    pub fn load<P: AsRef<Path>>(locale: &str, locales_dir: P) -> Result<Self> {
        let path = locales_dir.as_ref().join(format!("{locale}.toml"));

        if !path.exists() {
            return Err(I18nError::LocaleNotFound(locale.to_string()));
        }

        let content = fs::read_to_string(&path)?;
        Self::from_str(locale, &content)
    }

    /// Create an I18n instance from a TOML string.
    pub fn from_str(locale: &str, content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;

        let mut messages = HashMap::new();
        flatten_toml("", &toml::Value::Table(table), &mut messages);

        Ok(Self {
            locale: locale.to_string(),
            messages,
        })
    }

    /// Resources compiled into the binary.
    pub fn builtin(locale: &str) -> Result<Self> {
        match locale {
            "ko" => Self::from_str(locale, BUILTIN_KO),
            "en" => Self::from_str(locale, BUILTIN_EN),
            _ => Err(I18nError::LocaleNotFound(locale.to_string())),
        }
    }

    /// Builtin resources for `locale`, overridden by `{locales_dir}/{locale}.toml` when present.
    ///
    /// A locale with no builtin resources must exist on disk.
    pub fn load_with_overrides<P: AsRef<Path>>(locale: &str, locales_dir: P) -> Result<Self> {
        let from_disk = match Self::load(locale, locales_dir) {
            Ok(i18n) => Some(i18n),
            Err(I18nError::LocaleNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        match (Self::builtin(locale), from_disk) {
            (Ok(mut base), Some(overrides)) => {
                base.merge(&overrides);
                Ok(base)
            }
            (Ok(base), None) => Ok(base),
            (Err(_), Some(loaded)) => Ok(loaded),
            (Err(e), None) => Err(e),
        }
    }

    /// Create an empty I18n instance.
    ///
    /// All translations will return the key itself.
    pub fn empty(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            messages: HashMap::new(),
        }
    }

    /// Get the current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translate a key to the current locale.
    ///
    /// If the key is not found, returns the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(|s| s.as_str()).unwrap_or(key)
    }

    /// Translate a key with parameter substitution.
    ///
    /// Parameters in the translation are marked as `{{name}}`.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut result = self.t(key).to_string();

        for (name, value) in params {
            let placeholder = format!("{{{{{name}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }

    /// Merge another I18n instance into this one.
    ///
    /// Messages from the other instance will override existing ones.
    pub fn merge(&mut self, other: &I18n) {
        for (key, value) in &other.messages {
            self.messages.insert(key.clone(), value.clone());
        }
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::builtin(DEFAULT_LOCALE).unwrap_or_else(|_| Self::empty(DEFAULT_LOCALE))
    }
}

/// Flatten a TOML value into a HashMap with dot-separated keys.
fn flatten_toml(prefix: &str, value: &toml::Value, map: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_toml(&new_prefix, val, map);
            }
        }
        toml::Value::String(s) => {
            map.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(i) => {
            map.insert(prefix.to_string(), i.to_string());
        }
        toml::Value::Float(f) => {
            map.insert(prefix.to_string(), f.to_string());
        }
        toml::Value::Boolean(b) => {
            map.insert(prefix.to_string(), b.to_string());
        }
        toml::Value::Array(_) => {}
        toml::Value::Datetime(dt) => {
            map.insert(prefix.to_string(), dt.to_string());
        }
    }
}
