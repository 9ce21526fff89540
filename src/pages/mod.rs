//! Page containers
//!
//! Each page keeps a local copy of one collection, filters it by a search
//! term and runs create/update/delete against the backend. Pages never
//! propagate API errors: every outcome becomes a notification and the
//! methods report plain success as `bool`.
//!
//! After a successful mutation a resource page reloads the whole cache
//! (all five collections) and re-syncs from the new snapshot.

pub mod feedback;
pub mod groups;
pub mod schedule;

pub use groups::{DetailRequest, GroupDetail, GroupsPage};
pub use schedule::SchedulePage;

use crate::api::{ApiClient, Resource};
use crate::config::Config;
use crate::error::{Error, ErrorExt};
use crate::i18n::t;
use crate::models::{EntityId, Group, Hall, Student, Trainer, Validate};
use crate::notifications::NotificationCenter;
use crate::state::{ActivityFlag, AppState, Collection, LoadReport, Snapshot};
use crate::utils::contains_ci;
use crate::utils::error::ApiError;

/// Backend client, data cache and notification sink shared by all pages
#[derive(Debug)]
pub struct Session {
    pub api: ApiClient,
    pub state: AppState,
    pub notes: NotificationCenter,
}

impl Session {
    pub fn new(api: ApiClient, notes: NotificationCenter) -> Self {
        Self {
            api,
            state: AppState::new(),
            notes,
        }
    }

    /// Build a session from configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self::new(api, NotificationCenter::new(config.notifications.clone())))
    }

    /// Reload all five collections
    pub async fn refresh(&mut self) -> LoadReport {
        self.state.load_all(&self.api, &mut self.notes).await
    }

    /// Reload one collection; failures are already reported as notifications
    pub async fn reload(&mut self, collection: Collection) {
        if let Err(err) = self.state.reload(collection, &self.api, &mut self.notes).await {
            tracing::warn!(collection = %collection, error = %err, "Reload failed");
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.state.snapshot()
    }
}

/// Resource shown on a page: free-text search and a display name
pub trait Searchable: Resource {
    /// Case-insensitive match of `term` against the page's search fields
    fn matches(&self, term: &str) -> bool;

    /// Localized entity name used in notifications
    fn entity_name() -> String;
}

impl Searchable for Group {
    fn matches(&self, term: &str) -> bool {
        self.name.as_deref().is_some_and(|n| contains_ci(n, term))
            || self.trainer_name().is_some_and(|n| contains_ci(n, term))
            || self.dance_style().is_some_and(|s| contains_ci(s, term))
            || contains_ci(self.difficulty.as_str(), term)
    }

    fn entity_name() -> String {
        t!("entity.group").to_string()
    }
}

impl Searchable for Trainer {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || contains_ci(&self.phone_number, term)
            || contains_ci(&self.dance_style, term)
    }

    fn entity_name() -> String {
        t!("entity.trainer").to_string()
    }
}

impl Searchable for Student {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.name, term) || contains_ci(&self.phone_number, term)
    }

    fn entity_name() -> String {
        t!("entity.student").to_string()
    }
}

impl Searchable for Hall {
    fn matches(&self, term: &str) -> bool {
        contains_ci(&self.name, term)
            || self.area.is_some_and(|a| a.to_string().contains(term.trim()))
    }

    fn entity_name() -> String {
        t!("entity.hall").to_string()
    }
}

/// Search, create, update and delete over one resource collection
#[derive(Debug)]
pub struct ResourcePage<R: Searchable> {
    items: Vec<R>,
    search: String,
    processing: ActivityFlag,
    pending_delete: Option<EntityId>,
}

impl<R: Searchable> Default for ResourcePage<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            processing: ActivityFlag::new(),
            pending_delete: None,
        }
    }
}

impl<R: Searchable> ResourcePage<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the collection from the cache
    pub fn sync(&mut self, snapshot: &Snapshot) {
        self.items = R::cached(snapshot).to_vec();
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Items matching the search term; a blank term shows everything
    pub fn filtered(&self) -> Vec<&R> {
        let term = self.search.trim();
        self.items
            .iter()
            .filter(|item| term.is_empty() || item.matches(term))
            .collect()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_active()
    }

    /// Handle that reports `is_processing` while a call is awaited elsewhere
    pub fn processing_flag(&self) -> ActivityFlag {
        self.processing.clone()
    }

    pub async fn create(&mut self, session: &mut Session, payload: &R::Payload) -> bool {
        let operation = t!("operation.create", entity = R::entity_name()).to_string();
        if !self.check(session, payload) {
            return false;
        }

        let busy = self.processing.begin();
        let result = session.api.create::<R>(payload).await;
        drop(busy);

        match result {
            Ok(created) => {
                tracing::info!(entity = R::PATH, id = ?created.map(|r| r.id()), "Created");
                session
                    .notes
                    .success(t!("page.created", entity = R::entity_name()).to_string());
                self.after_mutation(session).await;
                true
            }
            Err(err) => {
                session.notes.error(feedback::failure(&operation, &err));
                false
            }
        }
    }

    pub async fn update(&mut self, session: &mut Session, id: EntityId, payload: &R::Payload) -> bool {
        let operation = t!("operation.update", entity = R::entity_name()).to_string();
        if !self.check(session, payload) {
            return false;
        }

        let busy = self.processing.begin();
        let result = session.api.update::<R>(id, payload).await;
        drop(busy);

        match result {
            Ok(_) => {
                tracing::info!(entity = R::PATH, id, "Updated");
                session
                    .notes
                    .success(t!("page.updated", entity = R::entity_name()).to_string());
                self.after_mutation(session).await;
                true
            }
            Err(err) => {
                session.notes.error(feedback::failure(&operation, &err));
                false
            }
        }
    }

    /// Arm the inline delete confirmation for `id`
    pub fn request_delete(&mut self, id: EntityId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    /// Delete the item awaiting confirmation; `false` when none is armed
    pub async fn confirm_delete(&mut self, session: &mut Session) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        let busy = self.processing.begin();
        let result = session.api.delete::<R>(id).await;
        drop(busy);

        match result {
            Ok(()) => {
                tracing::info!(entity = R::PATH, id, "Deleted");
                session
                    .notes
                    .success(t!("page.deleted", entity = R::entity_name()).to_string());
                self.after_mutation(session).await;
                true
            }
            Err(err) => {
                let operation = t!("operation.delete", entity = R::entity_name()).to_string();
                session.notes.error(feedback::failure(&operation, &err));
                false
            }
        }
    }

    fn check(&self, session: &mut Session, payload: &R::Payload) -> bool {
        match payload.validate() {
            Ok(()) => true,
            Err(err) => {
                let err = Error::from(err);
                tracing::debug!(entity = R::PATH, category = ?err.category(), error = %err, "Validation failed");
                session.notes.error(err.localized_desc());
                false
            }
        }
    }

    async fn after_mutation(&mut self, session: &mut Session) {
        session.refresh().await;
        self.sync(session.snapshot());
    }
}
