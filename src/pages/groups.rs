//! Groups page with expandable detail rows
//!
//! Expanding a row fetches the group and its schedule. Each fetch carries a
//! [`DetailRequest`] ticket; a result whose ticket is no longer current (the
//! user collapsed the row or expanded another one meanwhile) is discarded.
//!
//! Membership changes are replace-style: the full student list is sent with
//! `PUT /group/:id`.

use super::{feedback, ResourcePage, Session};
use crate::api::ApiClient;
use crate::i18n::t;
use crate::models::{EntityId, Group, GroupPayload, ScheduleItem, Student};
use crate::notifications::NotificationCenter;
use crate::select::{self, SearchableSelect};
use crate::state::Snapshot;
use crate::utils::error::{ApiError, ValidationError};

/// Ticket identifying one detail load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub group_id: EntityId,
    pub seq: u64,
}

/// Raw results of a detail load, not yet applied
#[derive(Debug)]
pub struct DetailFetch {
    pub ticket: DetailRequest,
    pub group: Result<Group, ApiError>,
    pub schedule: Result<Vec<ScheduleItem>, ApiError>,
}

impl DetailFetch {
    /// Fetch the group and its schedule concurrently
    pub async fn run(api: &ApiClient, ticket: DetailRequest) -> Self {
        let (group, schedule) = tokio::join!(
            api.get::<Group>(ticket.group_id),
            api.schedule_items_by_group(ticket.group_id),
        );
        Self {
            ticket,
            group,
            schedule,
        }
    }
}

/// Fetched detail of the expanded group
#[derive(Debug, Clone)]
pub struct GroupDetail {
    pub group: Group,
    pub schedule: Vec<ScheduleItem>,
}

/// Groups list plus the single expanded row
#[derive(Debug, Default)]
pub struct GroupsPage {
    pub page: ResourcePage<Group>,
    expanded: Option<EntityId>,
    detail: Option<GroupDetail>,
    student_select: Option<SearchableSelect<Student>>,
    current: Option<DetailRequest>,
    next_seq: u64,
}

impl GroupsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, snapshot: &Snapshot) {
        self.page.sync(snapshot);
    }

    pub fn expanded(&self) -> Option<EntityId> {
        self.expanded
    }

    pub fn detail(&self) -> Option<&GroupDetail> {
        self.detail.as_ref()
    }

    pub fn student_select(&self) -> Option<&SearchableSelect<Student>> {
        self.student_select.as_ref()
    }

    pub fn student_select_mut(&mut self) -> Option<&mut SearchableSelect<Student>> {
        self.student_select.as_mut()
    }

    /// Expand `id` (collapsing any other row) or collapse it if already expanded
    ///
    /// Returns the ticket for the detail load the expansion needs.
    pub fn toggle(&mut self, id: EntityId) -> Option<DetailRequest> {
        if self.expanded == Some(id) {
            self.collapse();
            return None;
        }

        self.collapse();
        self.expanded = Some(id);
        Some(self.begin(id))
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
        self.detail = None;
        self.student_select = None;
        self.current = None;
    }

    /// Issue a new ticket for `group_id`, superseding any earlier one
    pub fn begin(&mut self, group_id: EntityId) -> DetailRequest {
        self.next_seq += 1;
        let ticket = DetailRequest {
            group_id,
            seq: self.next_seq,
        };
        self.current = Some(ticket);
        ticket
    }

    fn is_current(&self, ticket: DetailRequest) -> bool {
        self.current == Some(ticket) && self.expanded == Some(ticket.group_id)
    }

    /// Apply a finished detail load; stale results are dropped
    pub fn apply(
        &mut self,
        fetch: DetailFetch,
        snapshot: &Snapshot,
        notes: &mut NotificationCenter,
    ) -> bool {
        if !self.is_current(fetch.ticket) {
            tracing::debug!(
                group_id = fetch.ticket.group_id,
                seq = fetch.ticket.seq,
                "Discarding stale group detail"
            );
            return false;
        }

        let group = match fetch.group {
            Ok(group) => group,
            Err(err) => {
                tracing::warn!(group_id = fetch.ticket.group_id, error = %err, "Group detail failed");
                notes.error(t!("groups.detail_failed").to_string());
                self.detail = None;
                self.student_select = None;
                return true;
            }
        };

        let schedule = fetch.schedule.unwrap_or_else(|err| {
            tracing::warn!(group_id = group.id, error = %err, "Group schedule failed");
            notes.warning(t!("groups.schedule_failed").to_string());
            Vec::new()
        });

        self.student_select = Some(
            select::students(snapshot.students.clone()).exclude(group.student_ids()),
        );
        self.detail = Some(GroupDetail { group, schedule });
        true
    }

    /// Toggle a row and, if it expanded, load its detail
    pub async fn expand(&mut self, session: &mut Session, id: EntityId) {
        if let Some(ticket) = self.toggle(id) {
            let fetch = DetailFetch::run(&session.api, ticket).await;
            self.apply(fetch, session.state.snapshot(), &mut session.notes);
        }
    }

    /// Reload the detail of the expanded group
    pub async fn refresh_detail(&mut self, session: &mut Session) {
        let Some(id) = self.expanded else {
            return;
        };
        let ticket = self.begin(id);
        let fetch = DetailFetch::run(&session.api, ticket).await;
        self.apply(fetch, session.state.snapshot(), &mut session.notes);
    }

    /// Current state of a group: fetched detail first, then the cache
    fn group_for(&self, session: &Session, group_id: EntityId) -> Option<Group> {
        self.detail
            .as_ref()
            .map(|d| &d.group)
            .filter(|g| g.id == group_id)
            .or_else(|| session.snapshot().find::<Group>(group_id))
            .cloned()
    }

    /// Add a student with a full-membership `PUT`
    pub async fn add_student(&mut self, session: &mut Session, group_id: EntityId, student_id: EntityId) -> bool {
        let Some(group) = self.group_for(session, group_id) else {
            session.notes.error(t!("groups.not_found", id = group_id).to_string());
            return false;
        };

        if group.has_student(student_id) {
            session
                .notes
                .warning(ValidationError::StudentAlreadyInGroup.localized_desc());
            return false;
        }

        let mut payload = GroupPayload::from_group(&group);
        payload.students_id.push(student_id);

        let operation = t!("operation.add_student").to_string();
        self.save_membership(session, group_id, payload, &operation, t!("groups.student_added").to_string())
            .await
    }

    /// Remove a student with a full-membership `PUT`
    pub async fn remove_student(&mut self, session: &mut Session, group_id: EntityId, student_id: EntityId) -> bool {
        let Some(group) = self.group_for(session, group_id) else {
            session.notes.error(t!("groups.not_found", id = group_id).to_string());
            return false;
        };

        let mut payload = GroupPayload::from_group(&group);
        payload.students_id.retain(|id| *id != student_id);

        let operation = t!("operation.remove_student").to_string();
        self.save_membership(session, group_id, payload, &operation, t!("groups.student_removed").to_string())
            .await
    }

    async fn save_membership(
        &mut self,
        session: &mut Session,
        group_id: EntityId,
        payload: GroupPayload,
        operation: &str,
        success: String,
    ) -> bool {
        let busy = self.page.processing.begin();
        let result = session.api.update::<Group>(group_id, &payload).await;
        drop(busy);

        match result {
            Ok(_) => {
                tracing::info!(group_id, students = payload.students_id.len(), "Group membership saved");
                session.notes.success(success);
                if let Some(select) = self.student_select.as_mut() {
                    select.clear();
                }
                self.refresh_detail(session).await;
                session.refresh().await;
                self.sync(session.snapshot());
                true
            }
            Err(err) => {
                session.notes.error(feedback::failure(operation, &err));
                false
            }
        }
    }

    /// Delete the group awaiting confirmation, collapsing it if expanded
    pub async fn confirm_delete(&mut self, session: &mut Session) -> bool {
        let target = self.page.pending_delete();
        let deleted = self.page.confirm_delete(session).await;
        if deleted && target.is_some() && target == self.expanded {
            self.collapse();
        }
        deleted
    }
}
