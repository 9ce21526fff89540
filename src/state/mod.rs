//! Application data cache
//!
//! [`AppState`] is the single owner of the five backend collections. Views
//! read a [`Snapshot`]; the only ways to change it are [`AppState::load_all`]
//! and [`AppState::reload`], both of which refetch from the backend.

mod activity;

pub use activity::{ActivityFlag, ActivityGuard};

use std::collections::HashMap;

use crate::api::{ApiClient, Resource};
use crate::i18n::t;
use crate::models::{Group, Hall, ScheduleItem, Student, Trainer};
use crate::notifications::NotificationCenter;
use crate::utils::error::ApiError;

/// One of the five cached collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Groups,
    Trainers,
    Students,
    Halls,
    ScheduleItems,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Groups,
        Collection::Trainers,
        Collection::Students,
        Collection::Halls,
        Collection::ScheduleItems,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Trainers => "trainers",
            Self::Students => "students",
            Self::Halls => "halls",
            Self::ScheduleItems => "schedule_items",
        }
    }

    /// Notification shown when this collection fails to load
    pub fn load_failed_message(&self) -> String {
        match self {
            Self::Groups => t!("load.groups_failed").to_string(),
            Self::Trainers => t!("load.trainers_failed").to_string(),
            Self::Students => t!("load.students_failed").to_string(),
            Self::Halls => t!("load.halls_failed").to_string(),
            Self::ScheduleItems => t!("load.schedule_failed").to_string(),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the cached collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub groups: Vec<Group>,
    pub trainers: Vec<Trainer>,
    pub students: Vec<Student>,
    pub halls: Vec<Hall>,
    pub schedule_items: Vec<ScheduleItem>,
}

impl Snapshot {
    pub fn find<R: Resource>(&self, id: i64) -> Option<&R> {
        R::cached(self).iter().find(|r| r.id() == id)
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Groups => self.groups.len(),
            Collection::Trainers => self.trainers.len(),
            Collection::Students => self.students.len(),
            Collection::Halls => self.halls.len(),
            Collection::ScheduleItems => self.schedule_items.len(),
        }
    }

    fn clear(&mut self, collection: Collection) {
        match collection {
            Collection::Groups => self.groups.clear(),
            Collection::Trainers => self.trainers.clear(),
            Collection::Students => self.students.clear(),
            Collection::Halls => self.halls.clear(),
            Collection::ScheduleItems => self.schedule_items.clear(),
        }
    }
}

/// Outcome of a load: which collections failed and why
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub failures: Vec<(Collection, ApiError)>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, collection: Collection) -> bool {
        self.failures.iter().any(|(c, _)| *c == collection)
    }
}

/// Owner of the cached backend data
#[derive(Debug, Default)]
pub struct AppState {
    snapshot: Snapshot,
    loading: ActivityFlag,
    error: Option<String>,
    reloads: HashMap<Collection, u32>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// Handle that reports `is_loading` while a load is awaited elsewhere
    pub fn loading_flag(&self) -> ActivityFlag {
        self.loading.clone()
    }

    /// Application-level error, set when every collection failed to load
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// How many times `collection` has been fetched
    pub fn reload_count(&self, collection: Collection) -> u32 {
        self.reloads.get(&collection).copied().unwrap_or(0)
    }

    /// Fetch all five collections concurrently
    ///
    /// Each collection succeeds or fails on its own; a failed collection is
    /// emptied and reported through `notes`.
    pub async fn load_all(&mut self, api: &ApiClient, notes: &mut NotificationCenter) -> LoadReport {
        let _loading = self.loading.begin();
        tracing::info!("Loading all collections");

        let (groups, trainers, students, halls, schedule_items) = tokio::join!(
            api.list::<Group>(),
            api.list::<Trainer>(),
            api.list::<Student>(),
            api.list::<Hall>(),
            api.list::<ScheduleItem>(),
        );

        let mut report = LoadReport::default();
        self.apply(groups, &mut report, |s| &mut s.groups);
        self.apply(trainers, &mut report, |s| &mut s.trainers);
        self.apply(students, &mut report, |s| &mut s.students);
        self.apply(halls, &mut report, |s| &mut s.halls);
        self.apply(schedule_items, &mut report, |s| &mut s.schedule_items);

        for (collection, _) in &report.failures {
            notify_failure(*collection, notes);
        }

        self.error = if report.failures.len() == Collection::ALL.len() {
            report.failures.first().map(|(_, e)| e.message())
        } else {
            None
        };

        tracing::info!(
            groups = self.snapshot.groups.len(),
            trainers = self.snapshot.trainers.len(),
            students = self.snapshot.students.len(),
            halls = self.snapshot.halls.len(),
            schedule_items = self.snapshot.schedule_items.len(),
            failed = report.failures.len(),
            "Collections loaded"
        );

        report
    }

    /// Refetch a single collection
    pub async fn reload(
        &mut self,
        collection: Collection,
        api: &ApiClient,
        notes: &mut NotificationCenter,
    ) -> Result<(), ApiError> {
        let loading = self.loading.begin();
        let mut report = LoadReport::default();

        match collection {
            Collection::Groups => {
                let result = api.list::<Group>().await;
                self.apply(result, &mut report, |s| &mut s.groups);
            }
            Collection::Trainers => {
                let result = api.list::<Trainer>().await;
                self.apply(result, &mut report, |s| &mut s.trainers);
            }
            Collection::Students => {
                let result = api.list::<Student>().await;
                self.apply(result, &mut report, |s| &mut s.students);
            }
            Collection::Halls => {
                let result = api.list::<Hall>().await;
                self.apply(result, &mut report, |s| &mut s.halls);
            }
            Collection::ScheduleItems => {
                let result = api.list::<ScheduleItem>().await;
                self.apply(result, &mut report, |s| &mut s.schedule_items);
            }
        }

        drop(loading);

        match report.failures.pop() {
            Some((collection, err)) => {
                notify_failure(collection, notes);
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn apply<R: Resource>(
        &mut self,
        result: Result<Vec<R>, ApiError>,
        report: &mut LoadReport,
        slot: impl FnOnce(&mut Snapshot) -> &mut Vec<R>,
    ) {
        *self.reloads.entry(R::COLLECTION).or_insert(0) += 1;

        match result {
            Ok(items) => *slot(&mut self.snapshot) = items,
            Err(err) => {
                tracing::warn!(collection = %R::COLLECTION, error = %err, "Failed to load collection");
                self.snapshot.clear(R::COLLECTION);
                report.failures.push((R::COLLECTION, err));
            }
        }
    }
}

fn notify_failure(collection: Collection, notes: &mut NotificationCenter) {
    let message = collection.load_failed_message();
    match collection {
        Collection::Trainers => notes.warning(message),
        _ => notes.error(message),
    }
}
