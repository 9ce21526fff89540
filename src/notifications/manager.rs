//! Notification center collecting banners from page containers

use super::{Notification, NotificationLevel};
use crate::config::NotificationConfig;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Collects notifications until the surface drains them
#[derive(Debug, Default)]
pub struct NotificationCenter {
    config: NotificationConfig,
    queue: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            queue: Vec::new(),
        }
    }

    /// Push a notification with an explicit duration
    pub fn push(
        &mut self,
        level: NotificationLevel,
        message: impl Into<String>,
        duration: Duration,
    ) -> &Notification {
        let note = Notification::new(level, message, duration);

        match level {
            NotificationLevel::Error => tracing::warn!(message = %note.message, "notification"),
            _ => tracing::debug!(level = %level, message = %note.message, "notification"),
        }

        self.queue.push(note);
        &self.queue[self.queue.len() - 1]
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let duration = Duration::from_millis(self.config.success_ms);
        self.push(NotificationLevel::Success, message, duration);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let duration = Duration::from_millis(self.config.success_ms);
        self.push(NotificationLevel::Info, message, duration);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let duration = Duration::from_millis(self.config.warning_ms);
        self.push(NotificationLevel::Warning, message, duration);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let duration = Duration::from_millis(self.config.error_ms);
        self.push(NotificationLevel::Error, message, duration);
    }

    /// Error banner with a custom duration in milliseconds
    pub fn error_for(&mut self, message: impl Into<String>, millis: u64) {
        self.push(NotificationLevel::Error, message, Duration::from_millis(millis));
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Notifications still visible at `now`; expired ones are dropped
    pub fn active(&mut self, now: DateTime<Utc>) -> &[Notification] {
        self.queue.retain(|n| !n.is_expired(now));
        &self.queue
    }

    /// All queued notifications in order, emptying the queue
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Messages of a given level currently queued
    pub fn messages(&self, level: NotificationLevel) -> Vec<&str> {
        self.queue
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.as_str())
            .collect()
    }
}
