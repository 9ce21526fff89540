//! REST backend access
//!
//! [`ApiClient`] is a thin wrapper over `reqwest` that turns HTTP status codes
//! and JSON bodies into [`ApiError`](crate::error::ApiError). The five backend
//! resources share one set of CRUD calls through the [`Resource`] trait:
//!
//! ```text
//! GET    /{path}        list
//! GET    /{path}/:id    get one
//! POST   /{path}        create
//! PUT    /{path}/:id    update
//! DELETE /{path}/:id    delete
//! ```

mod client;

pub use client::ApiClient;

use serde::{de::DeserializeOwned, Serialize};

use crate::models::{
    EntityId, Group, GroupPayload, Hall, HallPayload, ScheduleItem, ScheduleItemPayload, Student,
    StudentPayload, Trainer, TrainerPayload, Validate,
};
use crate::state::{Collection, Snapshot};

/// A backend resource with CRUD endpoints under `PATH`
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Create/update body
    type Payload: Serialize + Validate + Send + Sync;

    /// Path segment under the API base URL
    const PATH: &'static str;

    /// Cache collection this resource lives in
    const COLLECTION: Collection;

    fn id(&self) -> EntityId;

    /// This resource's slice of the cached snapshot
    fn cached(snapshot: &Snapshot) -> &[Self];
}

impl Resource for Group {
    type Payload = GroupPayload;
    const PATH: &'static str = "group";
    const COLLECTION: Collection = Collection::Groups;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cached(snapshot: &Snapshot) -> &[Self] {
        &snapshot.groups
    }
}

impl Resource for Trainer {
    type Payload = TrainerPayload;
    const PATH: &'static str = "trainer";
    const COLLECTION: Collection = Collection::Trainers;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cached(snapshot: &Snapshot) -> &[Self] {
        &snapshot.trainers
    }
}

impl Resource for Student {
    type Payload = StudentPayload;
    const PATH: &'static str = "student";
    const COLLECTION: Collection = Collection::Students;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cached(snapshot: &Snapshot) -> &[Self] {
        &snapshot.students
    }
}

impl Resource for Hall {
    type Payload = HallPayload;
    const PATH: &'static str = "hall";
    const COLLECTION: Collection = Collection::Halls;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cached(snapshot: &Snapshot) -> &[Self] {
        &snapshot.halls
    }
}

impl Resource for ScheduleItem {
    type Payload = ScheduleItemPayload;
    const PATH: &'static str = "schedule_item";
    const COLLECTION: Collection = Collection::ScheduleItems;

    fn id(&self) -> EntityId {
        self.id
    }

    fn cached(snapshot: &Snapshot) -> &[Self] {
        &snapshot.schedule_items
    }
}
