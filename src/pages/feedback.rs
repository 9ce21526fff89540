//! User-facing messages for failed operations

use crate::i18n::t;
use crate::utils::error::ApiError;
use crate::utils::strip_routing_prefix;

/// `"{operation} failed: {message}"` with routing prefixes removed
pub fn failure(operation: &str, err: &ApiError) -> String {
    let message = strip_routing_prefix(&err.to_string());
    let message = if message.is_empty() {
        t!("feedback.server_error").to_string()
    } else {
        message
    };

    t!("feedback.failed", operation = operation, message = message).to_string()
}

/// Schedule create/update failure; a 409 always yields the slot conflict message
pub fn schedule_failure(operation: &str, err: &ApiError) -> String {
    if err.is_conflict() {
        t!("schedule.conflict").to_string()
    } else {
        failure(operation, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_failure_strips_prefix() {
        crate::i18n::set_locale("en");
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "Hall is in use".into());
        assert_eq!(failure("Delete Hall", &err), "Delete Hall failed: Hall is in use");
    }

    #[test]
    #[serial]
    fn test_conflict_ignores_body() {
        crate::i18n::set_locale("en");
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"message":"duplicate"}"#.into());
        assert_eq!(
            schedule_failure("Create Class", &err),
            "This time is already taken in this hall"
        );

        crate::i18n::set_locale("ru");
        assert_eq!(
            schedule_failure("Create Class", &err),
            "Данное время в этом зале занято"
        );
        crate::i18n::set_locale("en");
    }

    #[test]
    #[serial]
    fn test_network_failure_keeps_message() {
        crate::i18n::set_locale("en");
        let err = ApiError::Network {
            url: "http://localhost:8080/api/hall".into(),
            message: "connection refused".into(),
        };
        let text = schedule_failure("Create Class", &err);
        assert!(text.starts_with("Create Class failed: "));
        assert!(text.contains("connection refused"));
    }
}
