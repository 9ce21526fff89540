//! Unified error handling for the dancecenter crate
//!
//! Domain-specific errors (`ApiError`, `ValidationError`) are consolidated into
//! a single `Error` enum so they can cross module boundaries while keeping the
//! detail needed for user-facing messages.
//!
//! # Architecture
//!
//! - [`ErrorExt`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors

use thiserror::Error;

pub use crate::utils::error::{ApiError, ValidationError};

/// Common trait for all dancecenter error types
pub trait ErrorExt: std::error::Error {
    /// Check if this error is recoverable (re-triggering the action may succeed)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures before a response arrived
    Network,
    /// Non-success HTTP responses
    Http,
    /// Client-side field validation
    Validation,
    /// Configuration errors
    Config,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        use crate::i18n::t;
        match self {
            Self::Network => t!("errors.category.network").to_string(),
            Self::Http => t!("errors.category.http").to_string(),
            Self::Validation => t!("errors.category.validation").to_string(),
            Self::Config => t!("errors.category.config").to_string(),
        }
    }
}

/// Unified error type for the dancecenter crate
#[derive(Error, Debug)]
pub enum Error {
    /// REST backend errors
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Client-side validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration file, environment or value errors
    #[error("Config error: {0}")]
    Config(String),
}

impl ErrorExt for ApiError {
    fn is_recoverable(&self) -> bool {
        ApiError::is_recoverable(self)
    }

    fn localized_desc(&self) -> String {
        self.message()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network { .. } => ErrorCategory::Network,
            ApiError::Http { .. } | ApiError::Decode { .. } => ErrorCategory::Http,
            ApiError::Init(_) | ApiError::InvalidUrl(_) => ErrorCategory::Config,
        }
    }
}

impl ErrorExt for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => ApiError::is_recoverable(e),
            Self::Validation(_) | Self::Config(_) => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Api(e) => e.message(),
            Self::Validation(e) => e.localized_desc(),
            Self::Config(msg) => msg.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(e) => e.category(),
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Category label and description, as shown to the user
    pub fn report(&self) -> String {
        format!("{}: {}", self.category().localized_desc(), self.localized_desc())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let network = Error::Api(ApiError::Network {
            url: "http://x/api/hall".to_string(),
            message: "refused".to_string(),
        });
        assert_eq!(network.category(), ErrorCategory::Network);

        let http = Error::Api(ApiError::Http {
            status: 404,
            message: "not found".to_string(),
            body: None,
        });
        assert_eq!(http.category(), ErrorCategory::Http);

        let validation = Error::from(ValidationError::StartNotBeforeEnd);
        assert_eq!(validation.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_is_recoverable() {
        let server = Error::Api(ApiError::Http {
            status: 503,
            message: "busy".to_string(),
            body: None,
        });
        assert!(server.is_recoverable());

        let conflict = Error::Api(ApiError::Http {
            status: 409,
            message: "taken".to_string(),
            body: None,
        });
        assert!(!conflict.is_recoverable());

        assert!(!Error::from(ValidationError::MissingHall).is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let unified: Error = ValidationError::MissingGroup.into();
        assert!(matches!(unified, Error::Validation(_)));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("base_url is empty");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_recoverable());
        assert_eq!(err.localized_desc(), "base_url is empty");
    }

    #[test]
    fn test_invalid_base_url_is_config_category() {
        let err = Error::from(ApiError::InvalidUrl("studio/api".to_string()));
        assert_eq!(err.category(), ErrorCategory::Config);
    }
}
