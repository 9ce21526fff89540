//! Create/edit form for a schedule item with hour-granular time options

use chrono::{NaiveTime, TimeDelta, Timelike};

use super::{CLOSING_HOUR, FIRST_HOUR, LAST_HOUR};
use crate::models::{
    truncate_to_minute, DayOfWeek, EntityId, Hall, ScheduleItem, ScheduleItemPayload, Validate,
};
use crate::utils::error::ValidationError;

/// Whether the form creates a new item or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormMode {
    Create,
    Edit(EntityId),
}

/// Editable schedule item fields
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub mode: ScheduleFormMode,
    pub hall_id: Option<EntityId>,
    pub group_id: Option<EntityId>,
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl ScheduleForm {
    /// Start times offered: 08:00 through 22:00
    pub fn start_options() -> Vec<NaiveTime> {
        (FIRST_HOUR..=LAST_HOUR).map(hour).collect()
    }

    /// End times offered for `start`: full hours up to 23:00 strictly after it
    pub fn end_options(start: NaiveTime) -> Vec<NaiveTime> {
        (FIRST_HOUR..=CLOSING_HOUR)
            .map(hour)
            .filter(|end| *end > start)
            .collect()
    }

    /// One hour after `start`, capped at closing time
    pub fn default_end(start: NaiveTime) -> NaiveTime {
        let closing = hour(CLOSING_HOUR);
        let (later, wrapped) = start.overflowing_add_signed(TimeDelta::hours(1));
        let preferred = if wrapped != 0 || later > closing {
            closing
        } else {
            later
        };

        if preferred > start {
            preferred
        } else {
            Self::end_options(start).first().copied().unwrap_or(closing)
        }
    }

    /// Form for an empty grid cell: the slot's hour, one hour long
    pub fn for_slot(day: DayOfWeek, start_hour: u32, hall_id: Option<EntityId>) -> Self {
        let start = hour(start_hour);
        let options = Self::end_options(start);
        let preferred = hour((start_hour + 1).min(CLOSING_HOUR));

        let end = if options.contains(&preferred) {
            preferred
        } else {
            options.first().copied().unwrap_or_else(|| hour(CLOSING_HOUR))
        };

        Self {
            mode: ScheduleFormMode::Create,
            hall_id,
            group_id: None,
            day,
            start,
            end,
        }
    }

    /// Form for a new item without a cell: first hall, Monday 08:00-09:00
    pub fn blank(halls: &[Hall]) -> Self {
        let hall_id = halls.first().map(|h| h.id);
        Self::for_slot(DayOfWeek::Monday, FIRST_HOUR, hall_id)
    }

    /// Form pre-filled from an existing item
    pub fn for_item(item: &ScheduleItem) -> Self {
        Self {
            mode: ScheduleFormMode::Edit(item.id),
            hall_id: item.hall_ref(),
            group_id: item.group_ref(),
            day: item.day_of_week,
            start: item.start_time,
            end: item.end_time,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, ScheduleFormMode::Edit(_))
    }

    /// Change the start time, resetting the end when it is no longer after it
    pub fn set_start(&mut self, start: NaiveTime) {
        self.start = start;
        let options = Self::end_options(start);
        if !options.contains(&self.end) {
            self.end = options.first().copied().unwrap_or_else(|| hour(CLOSING_HOUR));
        }
    }

    pub fn set_end(&mut self, end: NaiveTime) {
        self.end = end;
    }

    /// Put the end back to one hour after the current start
    pub fn reset_end(&mut self) {
        self.end = Self::default_end(self.start);
    }

    /// Start hour, if the form's start sits on a full hour
    pub fn start_hour(&self) -> Option<u32> {
        (self.start.minute() == 0).then(|| self.start.hour())
    }

    /// Check the form and build the request body
    pub fn to_payload(&self) -> Result<ScheduleItemPayload, ValidationError> {
        let group_id = self.group_id.ok_or(ValidationError::MissingGroup)?;
        let hall_id = self.hall_id.ok_or(ValidationError::MissingHall)?;

        let payload = ScheduleItemPayload {
            hall_id,
            group_id,
            day_of_week: self.day,
            start_time: truncate_to_minute(self.start),
            end_time: truncate_to_minute(self.end),
        };
        payload.validate()?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lists() {
        let starts = ScheduleForm::start_options();
        assert_eq!(starts.len(), 15);
        assert_eq!(starts[0], hour(8));
        assert_eq!(starts[14], hour(22));

        let ends = ScheduleForm::end_options(hour(20));
        assert_eq!(ends, vec![hour(21), hour(22), hour(23)]);
        assert_eq!(ScheduleForm::end_options(hour(22)), vec![hour(23)]);
    }

    #[test]
    fn test_for_slot_defaults() {
        let form = ScheduleForm::for_slot(DayOfWeek::Wednesday, 14, Some(3));
        assert_eq!(form.mode, ScheduleFormMode::Create);
        assert_eq!(form.hall_id, Some(3));
        assert_eq!(form.day, DayOfWeek::Wednesday);
        assert_eq!(form.start, hour(14));
        assert_eq!(form.end, hour(15));

        let last = ScheduleForm::for_slot(DayOfWeek::Sunday, 22, Some(3));
        assert_eq!(last.end, hour(23));
    }

    #[test]
    fn test_set_start_resets_invalid_end() {
        let mut form = ScheduleForm::for_slot(DayOfWeek::Monday, 10, Some(1));
        form.set_end(hour(12));

        form.set_start(hour(11));
        assert_eq!(form.end, hour(12));

        form.set_start(hour(15));
        assert_eq!(form.end, hour(16));
    }

    #[test]
    fn test_default_end_is_one_hour_later() {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert_eq!(ScheduleForm::default_end(at(7, 0)), at(8, 0));
        assert_eq!(ScheduleForm::default_end(at(8, 30)), at(9, 30));
        assert_eq!(ScheduleForm::default_end(at(22, 30)), hour(23));

        let mut form = ScheduleForm::blank(&[]);
        form.set_start(at(7, 0));
        assert_eq!(form.end, hour(9));
        form.reset_end();
        assert_eq!(form.end, hour(8));

        form.set_start(at(8, 30));
        form.reset_end();
        assert_eq!((form.start, form.end), (at(8, 30), at(9, 30)));
    }

    #[test]
    fn test_payload_times_lose_seconds() {
        let mut form = ScheduleForm::for_slot(DayOfWeek::Friday, 9, Some(1));
        form.group_id = Some(2);
        form.start = NaiveTime::from_hms_opt(9, 30, 15).unwrap();
        form.end = NaiveTime::from_hms_opt(10, 45, 59).unwrap();

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.start_time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(payload.end_time, NaiveTime::from_hms_opt(10, 45, 0).unwrap());

        form.end = NaiveTime::from_hms_opt(9, 30, 40).unwrap();
        assert_eq!(form.to_payload(), Err(ValidationError::StartNotBeforeEnd));
    }

    #[test]
    fn test_blank_uses_first_hall() {
        let halls = vec![
            Hall {
                id: 4,
                name: "Red".into(),
                area: Some(50),
                schedule_items_id: vec![],
            },
            Hall {
                id: 9,
                name: "Blue".into(),
                area: Some(70),
                schedule_items_id: vec![],
            },
        ];
        let form = ScheduleForm::blank(&halls);
        assert_eq!(form.hall_id, Some(4));
        assert_eq!(form.day, DayOfWeek::Monday);
        assert_eq!((form.start, form.end), (hour(8), hour(9)));

        assert_eq!(ScheduleForm::blank(&[]).hall_id, None);
    }

    #[test]
    fn test_to_payload_validation() {
        let mut form = ScheduleForm::for_slot(DayOfWeek::Monday, 10, Some(1));
        assert_eq!(form.to_payload(), Err(ValidationError::MissingGroup));

        form.group_id = Some(2);
        form.hall_id = None;
        assert_eq!(form.to_payload(), Err(ValidationError::MissingHall));

        form.hall_id = Some(1);
        form.end = hour(10);
        assert_eq!(form.to_payload(), Err(ValidationError::StartNotBeforeEnd));

        form.end = hour(11);
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.group_id, 2);
        assert_eq!(payload.end_time, hour(11));
    }
}
