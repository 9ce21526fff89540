use anyhow::Result;
use chrono::NaiveTime;

use dancecenter::i18n::t;
use dancecenter::models::{DayOfWeek, EntityId, Group, Hall, ScheduleItem};
use dancecenter::pages::{SchedulePage, Searchable, Session};
use dancecenter::schedule::ScheduleForm;
use dancecenter::select;
use dancecenter::state::{Collection, Snapshot};

use super::{confirm_delete, not_resolved};

/// Collection sizes and load status
pub fn summary(session: &Session) -> bool {
    let snapshot = session.snapshot();
    for collection in Collection::ALL {
        println!("{:<16}{}", collection.as_str(), snapshot.len(collection));
    }
    if let Some(err) = session.state.error() {
        println!("\n{err}");
        return false;
    }
    true
}

fn group_label(snapshot: &Snapshot, item: &ScheduleItem) -> String {
    item.group
        .as_ref()
        .or_else(|| item.group_ref().and_then(|id| snapshot.find::<Group>(id)))
        .map(Group::summary)
        .unwrap_or_else(|| format!("#{}", item.id))
}

/// Weekly occupancy grid of one hall (the first hall by default)
pub fn grid(session: &mut Session, hall: Option<&str>) -> bool {
    let mut page = SchedulePage::new();
    page.sync(session.snapshot());

    if let Some(query) = hall {
        let found = select::halls(session.snapshot().halls.clone())
            .resolve(query)
            .map(|h| h.id);
        match found {
            Some(id) => {
                page.select_hall(session.snapshot(), id);
            }
            None => {
                session
                    .notes
                    .error(t!("cli.hall_not_found", query = query).to_string());
                return false;
            }
        }
    }

    let snapshot = session.snapshot();
    let Some(hall) = page.selected_hall().and_then(|id| snapshot.find::<Hall>(id)) else {
        println!("{}", t!("cli.no_halls"));
        return true;
    };

    let items = page.hall_items(snapshot);
    let grid = page.grid(&items);
    tracing::debug!(hall_id = hall.id, occupied = grid.occupied_count(), "Rendering grid");

    println!("{}", hall.name);
    print!("{}", grid.render(|item| group_label(snapshot, item)));
    true
}

fn resolve_hall(session: &mut Session, query: &str) -> Option<EntityId> {
    let found = select::halls(session.snapshot().halls.clone())
        .resolve(query)
        .map(|h| h.id);
    if found.is_none() {
        not_resolved(session, &Hall::entity_name(), query);
    }
    found
}

fn resolve_group(session: &mut Session, query: &str) -> Option<EntityId> {
    let found = select::groups(session.snapshot().groups.clone())
        .resolve(query)
        .map(|g| g.id);
    if found.is_none() {
        not_resolved(session, &Group::entity_name(), query);
    }
    found
}

/// Optional field overrides for a schedule item
#[derive(Debug, Default)]
pub struct ItemChanges {
    pub hall: Option<String>,
    pub group: Option<String>,
    pub day: Option<DayOfWeek>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

fn apply_changes(session: &mut Session, form: &mut ScheduleForm, changes: ItemChanges) -> bool {
    if let Some(query) = changes.hall {
        match resolve_hall(session, &query) {
            Some(id) => form.hall_id = Some(id),
            None => return false,
        }
    }
    if let Some(query) = changes.group {
        match resolve_group(session, &query) {
            Some(id) => form.group_id = Some(id),
            None => return false,
        }
    }
    if let Some(day) = changes.day {
        form.day = day;
    }
    if let Some(start) = changes.start {
        form.set_start(start);
    }
    if let Some(end) = changes.end {
        form.set_end(end);
    }
    true
}

pub async fn add_item(session: &mut Session, changes: ItemChanges) -> Result<bool> {
    let default_end = changes.end.is_none();
    let mut form = ScheduleForm::blank(&session.snapshot().halls);
    if !apply_changes(session, &mut form, changes) {
        return Ok(false);
    }
    if default_end {
        form.reset_end();
    }

    let mut page = SchedulePage::new();
    page.sync(session.snapshot());
    Ok(page.submit(session, &form).await)
}

pub async fn update_item(session: &mut Session, id: EntityId, changes: ItemChanges) -> Result<bool> {
    let Some(item) = session.snapshot().find::<ScheduleItem>(id) else {
        let entity = t!("entity.class").to_string();
        return Ok(not_resolved(session, &entity, &id.to_string()));
    };

    let mut form = ScheduleForm::for_item(item);
    if !apply_changes(session, &mut form, changes) {
        return Ok(false);
    }

    let mut page = SchedulePage::new();
    page.sync(session.snapshot());
    Ok(page.submit(session, &form).await)
}

pub async fn delete_item(session: &mut Session, id: EntityId, yes: bool) -> Result<bool> {
    let entity = t!("entity.class").to_string();
    if !confirm_delete(session, &entity, id, yes)? {
        return Ok(true);
    }

    let mut page = SchedulePage::new();
    page.sync(session.snapshot());
    Ok(page.delete(session, id).await)
}
