//! Transient notification banners
//!
//! Every page container reports the outcome of its API calls here instead of
//! propagating errors. Notifications are fire-and-forget: each carries its own
//! display duration and simply expires; nothing waits on them.
//!
//! # Example
//!
//! ```rust,ignore
//! use dancecenter::notifications::{NotificationCenter, NotificationLevel};
//!
//! let mut center = NotificationCenter::new(config.notifications.clone());
//! center.success("Hall created successfully.");
//!
//! for note in center.drain() {
//!     println!("{} {}", note.level.symbol(), note.message);
//! }
//! ```

mod manager;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

pub use manager::NotificationCenter;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Terminal marker
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✖",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single timed banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            created_at: Utc::now(),
            duration,
        }
    }

    /// Point in time after which the banner is hidden
    pub fn expires_at(&self) -> DateTime<Utc> {
        let duration = chrono::Duration::from_std(self.duration).unwrap_or(chrono::Duration::zero());
        self.created_at + duration
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let note = Notification::new(
            NotificationLevel::Success,
            "saved",
            Duration::from_millis(3000),
        );
        assert!(!note.is_expired(note.created_at));
        assert!(!note.is_expired(note.created_at + chrono::Duration::milliseconds(2999)));
        assert!(note.is_expired(note.created_at + chrono::Duration::milliseconds(3000)));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(NotificationLevel::Warning.to_string(), "warning");
        assert_eq!(NotificationLevel::Error.as_str(), "error");
    }
}
