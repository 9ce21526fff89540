//! Internationalization (i18n) support
//!
//! User-facing text (notifications, validation messages, grid labels) is
//! translated through `rust-i18n`. Supported languages: English (en) and
//! Russian (ru).
//!
//! # Environment Variables
//!
//! - `DANCECENTER_LANG`: Set the preferred language (en, ru). Defaults to English.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dancecenter::i18n::{t, set_locale};
//!
//! set_locale("ru");
//! let msg = t!("schedule.conflict");
//! ```

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

/// Set the current locale for translations
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale);
    rust_i18n::set_locale(normalized);
}

/// Get the current locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Initialize i18n from environment variables
///
/// Reads `DANCECENTER_LANG`; falls back to English if not set or unknown.
pub fn init_from_env() {
    let locale = std::env::var("DANCECENTER_LANG").unwrap_or_else(|_| "en".to_string());
    set_locale(&locale);
}

/// Normalize locale code to a supported one
///
/// - ru-RU, ru_RU, russian -> ru
/// - anything else -> en
fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.to_lowercase();

    if lower.starts_with("ru") || lower == "russian" {
        "ru"
    } else {
        "en"
    }
}

#[doc(inline)]
pub use rust_i18n::t;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ru"), "ru");
        assert_eq!(normalize_locale("ru-RU"), "ru");
        assert_eq!(normalize_locale("ru_RU"), "ru");
        assert_eq!(normalize_locale("russian"), "ru");

        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("unknown"), "en");
    }

    #[test]
    #[serial]
    fn test_set_and_get_locale() {
        set_locale("ru-RU");
        assert_eq!(current_locale(), "ru");
        assert_eq!(t!("schedule.conflict"), "Данное время в этом зале занято");

        set_locale("en-US");
        assert_eq!(current_locale(), "en");
        assert_eq!(t!("schedule.conflict"), "This time is already taken in this hall");
    }
}
