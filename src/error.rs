//! Error types for the admin console.

use thiserror::Error;

use crate::i18n::I18nError;

/// Common error type for the admin console.
#[derive(Error, Debug)]
pub enum AdminError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Session storage could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),

    /// Locale resources could not be loaded.
    #[error("locale error: {0}")]
    I18n(#[from] I18nError),
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::Storage(e.to_string())
    }
}

/// Result type alias for admin console operations.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AdminError::Config("page_size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: page_size must be positive"
        );
    }

    #[test]
    fn test_storage_error_display() {
        let err = AdminError::Storage("unexpected end of file".to_string());
        assert_eq!(err.to_string(), "session storage error: unexpected end of file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AdminError = io_err.into();
        assert!(matches!(err, AdminError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AdminError = json_err.into();
        assert!(matches!(err, AdminError::Storage(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(AdminError::Config("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
