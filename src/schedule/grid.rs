//! Occupancy grid calculation

use chrono::NaiveTime;

use super::{FIRST_HOUR, LAST_HOUR};
use crate::i18n::t;
use crate::models::{format_hm, DayOfWeek, EntityId, ScheduleItem};
use crate::utils::truncate_text;

/// One-hour slot `[hour:00, hour+1:00)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: u32,
}

impl HourSlot {
    /// All slots of a day in order
    pub fn all() -> impl Iterator<Item = HourSlot> {
        (FIRST_HOUR..=LAST_HOUR).map(|hour| HourSlot { hour })
    }

    pub fn start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    pub fn end(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour + 1, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// `08:00 - 09:00`
    pub fn label(&self) -> String {
        format!("{} - {}", format_hm(self.start()), format_hm(self.end()))
    }
}

/// A grid cell: free, or taken by a schedule item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Empty {
        day: DayOfWeek,
        hour: u32,
        hall_id: Option<EntityId>,
    },
    Occupied(&'a ScheduleItem),
}

impl<'a> Cell<'a> {
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn item(&self) -> Option<&'a ScheduleItem> {
        match self {
            Cell::Occupied(item) => Some(item),
            Cell::Empty { .. } => None,
        }
    }
}

/// Schedule items whose hall reference is `hall_id`
pub fn items_for_hall(items: &[ScheduleItem], hall_id: EntityId) -> Vec<ScheduleItem> {
    items
        .iter()
        .filter(|item| item.hall_ref() == Some(hall_id))
        .cloned()
        .collect()
}

/// Hour slot × weekday occupancy for one hall
#[derive(Debug, Clone)]
pub struct OccupancyGrid<'a> {
    hall_id: Option<EntityId>,
    rows: Vec<(HourSlot, Vec<Cell<'a>>)>,
}

impl<'a> OccupancyGrid<'a> {
    /// Build the grid from the items of a single hall
    ///
    /// When several items overlap one cell, the first in input order wins.
    pub fn build(items: &'a [ScheduleItem], hall_id: Option<EntityId>) -> Self {
        let rows = HourSlot::all()
            .map(|slot| {
                let cells = DayOfWeek::ALL
                    .iter()
                    .map(|&day| {
                        items
                            .iter()
                            .find(|item| {
                                item.day_of_week == day && item.overlaps(slot.start(), slot.end())
                            })
                            .map(Cell::Occupied)
                            .unwrap_or(Cell::Empty {
                                day,
                                hour: slot.hour,
                                hall_id,
                            })
                    })
                    .collect();
                (slot, cells)
            })
            .collect();

        Self { hall_id, rows }
    }

    pub fn hall_id(&self) -> Option<EntityId> {
        self.hall_id
    }

    pub fn rows(&self) -> &[(HourSlot, Vec<Cell<'a>>)] {
        &self.rows
    }

    /// Cell at (`day`, `hour`), `None` outside the grid
    pub fn cell(&self, day: DayOfWeek, hour: u32) -> Option<Cell<'a>> {
        let row = hour.checked_sub(FIRST_HOUR)? as usize;
        let col = DayOfWeek::ALL.iter().position(|&d| d == day)?;
        self.rows.get(row).and_then(|(_, cells)| cells.get(col)).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|(_, cells)| cells.iter())
            .filter(|c| c.is_occupied())
            .count()
    }

    /// Plain-text table; occupied cells show the group label
    pub fn render(&self, label: impl Fn(&ScheduleItem) -> String) -> String {
        const WIDTH: usize = 12;

        let mut out = format!("{:<15}", t!("schedule.time"));
        for day in DayOfWeek::ALL {
            out.push_str(&format!("|{:^WIDTH$}", day.short_label()));
        }
        out.push('\n');

        for (slot, cells) in &self.rows {
            out.push_str(&format!("{:<15}", slot.label()));
            for cell in cells {
                let text = match cell {
                    Cell::Occupied(item) => truncate_text(&label(item), WIDTH),
                    Cell::Empty { .. } => String::new(),
                };
                out.push_str(&format!("|{text:^WIDTH$}"));
            }
            out.push('\n');
        }

        out
    }
}
