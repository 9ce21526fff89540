//! dancecenter - Administrative client for a dance-studio scheduling service
//!
//! Manages halls, trainers, students and groups over the studio's REST
//! backend and shows the weekly schedule as an occupancy grid per hall.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Entities, request payloads and client-side validation
//! - [`api`] - REST client and the generic [`api::Resource`] CRUD contract
//! - [`state`] - Application data cache (the five collections)
//! - [`schedule`] - Occupancy grid and time-slot form
//! - [`select`] - Generic searchable selector
//! - [`pages`] - Page containers: search, CRUD, group detail, schedule
//! - [`notifications`] - Timed notification banners
//! - [`i18n`] - English and Russian user-facing text
//! - [`utils`] - Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dancecenter::config::Config;
//! use dancecenter::pages::{SchedulePage, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let mut session = Session::from_config(&config)?;
//!     session.refresh().await;
//!
//!     let mut schedule = SchedulePage::new();
//!     schedule.sync(session.snapshot());
//!     let items = schedule.hall_items(session.snapshot());
//!     println!("{}", schedule.grid(&items).render(|item| item.time_range()));
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod notifications;
pub mod pages;
pub mod schedule;
pub mod select;
pub mod state;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{ApiClient, Resource};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, ErrorExt, Result};
    pub use crate::models::{
        DayOfWeek, Difficulty, EntityId, Group, Hall, ScheduleItem, Student, Trainer,
    };
    pub use crate::notifications::{Notification, NotificationCenter, NotificationLevel};
    pub use crate::pages::{GroupsPage, ResourcePage, SchedulePage, Session};
    pub use crate::state::{AppState, Collection, Snapshot};
}

// Direct re-exports for convenience
pub use models::{DayOfWeek, Difficulty, Group, Hall, ScheduleItem, Student, Trainer};
