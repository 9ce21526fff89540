//! Error types for the API client and client-side validation
//!
//! `ApiError` is the single normalized shape every failed backend call is
//! reduced to: a human-readable message, an optional HTTP status and an
//! optional raw response body.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the REST backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// HTTP client could not be constructed
    #[error("Initialization error: {0}")]
    Init(String),

    /// Request was rejected before any response arrived (connectivity, CORS, DNS)
    #[error("Network error: could not reach {url}: {message}")]
    Network { url: String, message: String },

    /// Backend answered with a non-success status
    #[error("API error: {status}. {message}")]
    Http {
        status: u16,
        message: String,
        body: Option<String>,
    },

    /// Success response whose body could not be decoded
    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Base URL or endpoint could not be joined into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build an HTTP error from status and raw body
    ///
    /// The message is taken from a JSON `{message}` object, a JSON string
    /// body, or a non-JSON text body. Anything else, including a JSON object
    /// without `message`, falls back to the status reason phrase.
    pub fn from_response(status: StatusCode, body: String) -> Self {
        let message = extract_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

        Self::Http {
            status: status.as_u16(),
            message,
            body: (!body.is_empty()).then_some(body),
        }
    }

    /// HTTP status, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    /// Human-readable message without the status prefix
    pub fn message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Network { .. } => {
                crate::i18n::t!("errors.network", url = self.url().unwrap_or_default()).to_string()
            }
            other => other.to_string(),
        }
    }

    /// 409 Conflict
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT.as_u16())
    }

    fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. } | Self::Decode { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Network failures and 5xx responses may succeed when re-triggered
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(msg)) if !msg.is_empty() => Some(msg.clone()),
            _ => None,
        },
        Ok(serde_json::Value::String(msg)) => Some(msg),
        _ => Some(trimmed.to_string()),
    }
}

/// Client-side field checks performed before any network call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("start time must be earlier than end time")]
    StartNotBeforeEnd,

    #[error("no group selected")]
    MissingGroup,

    #[error("no hall selected")]
    MissingHall,

    #[error("no trainer selected")]
    MissingTrainer,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("area must be a positive number")]
    NonPositiveArea,

    #[error("student is already in this group")]
    StudentAlreadyInGroup,
}

impl ValidationError {
    /// Localized description for user-facing messages
    pub fn localized_desc(&self) -> String {
        use crate::i18n::t;
        match self {
            Self::StartNotBeforeEnd => t!("validation.start_before_end").to_string(),
            Self::MissingGroup => t!("validation.select_group").to_string(),
            Self::MissingHall => t!("validation.select_hall").to_string(),
            Self::MissingTrainer => t!("validation.select_trainer").to_string(),
            Self::EmptyField(field) => {
                t!("validation.required", field = field_label(field)).to_string()
            }
            Self::NonPositiveArea => t!("validation.area_positive").to_string(),
            Self::StudentAlreadyInGroup => t!("validation.student_in_group").to_string(),
        }
    }
}

fn field_label(field: &str) -> String {
    use crate::i18n::t;
    match field {
        "name" => t!("fields.name").to_string(),
        "phone" => t!("fields.phone").to_string(),
        "dance style" => t!("fields.dance_style").to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_object() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Hall name is taken"}"#.to_string(),
        );
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message(), "Hall name is taken");
        assert_eq!(err.to_string(), "API error: 400. Hall name is taken");
        assert!(err.body().is_some());
    }

    #[test]
    fn test_json_object_without_message_uses_reason() {
        let body = r#"{"timestamp":"2024-05-01T10:00:00","status":404,"path":"/api/hall/9"}"#;
        let err = ApiError::from_response(StatusCode::NOT_FOUND, body.to_string());
        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.body(), Some(body));

        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"message":""}"#.to_string());
        assert_eq!(err.message(), "Bad Request");
    }

    #[test]
    fn test_message_from_plain_text() {
        let err = ApiError::from_response(StatusCode::CONFLICT, "Slot taken".to_string());
        assert!(err.is_conflict());
        assert_eq!(err.message(), "Slot taken");
    }

    #[test]
    fn test_message_from_json_string() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "\"Group not found\"".to_string());
        assert_eq!(err.message(), "Group not found");
    }

    #[test]
    fn test_message_falls_back_to_reason() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        assert_eq!(err.message(), "Internal Server Error");
        assert_eq!(err.body(), None);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::Network {
            url: "http://localhost/api/hall".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_conflict());
        assert!(err.is_recoverable());
    }
}
