//! Schedule page: hall selection, occupancy grid and item editing
//!
//! Unlike the resource pages, schedule mutations reload only the
//! schedule-item collection.

use super::{feedback, Session};
use crate::error::{Error, ErrorExt};
use crate::i18n::t;
use crate::models::{DayOfWeek, EntityId, ScheduleItem};
use crate::schedule::{items_for_hall, Cell, OccupancyGrid, ScheduleForm, ScheduleFormMode};
use crate::state::{ActivityFlag, Collection, Snapshot};

#[derive(Debug, Default)]
pub struct SchedulePage {
    selected_hall: Option<EntityId>,
    processing: ActivityFlag,
}

impl SchedulePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selected hall if it still exists, else fall back to the first
    pub fn sync(&mut self, snapshot: &Snapshot) {
        let still_there = self
            .selected_hall
            .is_some_and(|id| snapshot.halls.iter().any(|h| h.id == id));

        if !still_there {
            self.selected_hall = snapshot.halls.first().map(|h| h.id);
        }
    }

    pub fn selected_hall(&self) -> Option<EntityId> {
        self.selected_hall
    }

    /// Select a hall; `false` if it is not in the snapshot
    pub fn select_hall(&mut self, snapshot: &Snapshot, hall_id: EntityId) -> bool {
        if snapshot.halls.iter().any(|h| h.id == hall_id) {
            self.selected_hall = Some(hall_id);
            true
        } else {
            false
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_active()
    }

    /// Handle that reports `is_processing` while a call is awaited elsewhere
    pub fn processing_flag(&self) -> ActivityFlag {
        self.processing.clone()
    }

    /// Schedule items of the selected hall
    pub fn hall_items(&self, snapshot: &Snapshot) -> Vec<ScheduleItem> {
        match self.selected_hall {
            Some(hall_id) => items_for_hall(&snapshot.schedule_items, hall_id),
            None => Vec::new(),
        }
    }

    /// Occupancy grid over `items` (usually [`Self::hall_items`])
    pub fn grid<'a>(&self, items: &'a [ScheduleItem]) -> OccupancyGrid<'a> {
        OccupancyGrid::build(items, self.selected_hall)
    }

    /// Form behind a grid cell: edit for an occupied cell, create for an empty one
    pub fn open_cell(&self, snapshot: &Snapshot, day: DayOfWeek, hour: u32) -> Option<ScheduleForm> {
        let items = self.hall_items(snapshot);
        let grid = self.grid(&items);

        match grid.cell(day, hour)? {
            Cell::Occupied(item) => Some(ScheduleForm::for_item(item)),
            Cell::Empty { day, hour, hall_id } => Some(ScheduleForm::for_slot(day, hour, hall_id)),
        }
    }

    /// Create or update the item described by `form`
    pub async fn submit(&mut self, session: &mut Session, form: &ScheduleForm) -> bool {
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                let err = Error::from(err);
                tracing::debug!(category = ?err.category(), error = %err, "Schedule form rejected");
                session.notes.error(err.localized_desc());
                return false;
            }
        };

        let busy = self.processing.begin();
        let (result, operation, error_ms) = match form.mode {
            ScheduleFormMode::Create => (
                session.api.create::<ScheduleItem>(&payload).await.map(|_| ()),
                t!("operation.create_class").to_string(),
                session.notes.config().schedule_create_error_ms,
            ),
            ScheduleFormMode::Edit(id) => (
                session.api.update::<ScheduleItem>(id, &payload).await.map(|_| ()),
                t!("operation.update_class").to_string(),
                session.notes.config().schedule_update_error_ms,
            ),
        };
        drop(busy);

        match result {
            Ok(()) => {
                tracing::info!(
                    hall_id = payload.hall_id,
                    group_id = payload.group_id,
                    day = %payload.day_of_week,
                    "Schedule item saved"
                );
                let message = if form.is_edit() {
                    t!("schedule.updated")
                } else {
                    t!("schedule.created")
                };
                session.notes.success(message.to_string());
                session.reload(Collection::ScheduleItems).await;
                true
            }
            Err(err) => {
                session
                    .notes
                    .error_for(feedback::schedule_failure(&operation, &err), error_ms);
                false
            }
        }
    }

    pub async fn delete(&mut self, session: &mut Session, id: EntityId) -> bool {
        let busy = self.processing.begin();
        let result = session.api.delete::<ScheduleItem>(id).await;
        drop(busy);

        match result {
            Ok(()) => {
                tracing::info!(id, "Schedule item deleted");
                session.notes.success(t!("schedule.deleted").to_string());
                session.reload(Collection::ScheduleItems).await;
                true
            }
            Err(err) => {
                let operation = t!("operation.delete_class").to_string();
                session.notes.error(feedback::failure(&operation, &err));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Hall;
    use chrono::NaiveTime;

    fn hall(id: EntityId) -> Hall {
        Hall {
            id,
            name: format!("Hall {id}"),
            area: Some(100),
            schedule_items_id: vec![],
        }
    }

    fn snapshot_with_halls(ids: &[EntityId]) -> Snapshot {
        Snapshot {
            halls: ids.iter().map(|&id| hall(id)).collect(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_selection_follows_snapshot() {
        let mut page = SchedulePage::new();
        page.sync(&snapshot_with_halls(&[3, 4]));
        assert_eq!(page.selected_hall(), Some(3));

        let snapshot = snapshot_with_halls(&[3, 4]);
        assert!(page.select_hall(&snapshot, 4));
        page.sync(&snapshot);
        assert_eq!(page.selected_hall(), Some(4));

        page.sync(&snapshot_with_halls(&[5]));
        assert_eq!(page.selected_hall(), Some(5));

        page.sync(&Snapshot::default());
        assert_eq!(page.selected_hall(), None);
    }

    #[test]
    fn test_open_cell_empty_and_occupied() {
        let mut snapshot = snapshot_with_halls(&[1]);
        snapshot.schedule_items.push(ScheduleItem {
            id: 11,
            hall: None,
            hall_id: Some(1),
            group: None,
            group_id: Some(2),
            day_of_week: DayOfWeek::Thursday,
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        });

        let mut page = SchedulePage::new();
        page.sync(&snapshot);

        let edit = page.open_cell(&snapshot, DayOfWeek::Thursday, 19).unwrap();
        assert_eq!(edit.mode, ScheduleFormMode::Edit(11));
        assert_eq!(edit.group_id, Some(2));

        let create = page.open_cell(&snapshot, DayOfWeek::Thursday, 20).unwrap();
        assert_eq!(create.mode, ScheduleFormMode::Create);
        assert_eq!(create.hall_id, Some(1));
        assert_eq!(create.start, NaiveTime::from_hms_opt(20, 0, 0).unwrap());

        assert!(page.open_cell(&snapshot, DayOfWeek::Thursday, 6).is_none());
    }
}
