//! Occupancy grid tests, including a property test of slot placement

use chrono::NaiveTime;
use dancecenter::models::{DayOfWeek, ScheduleItem};
use dancecenter::schedule::{Cell, HourSlot, OccupancyGrid, ScheduleForm, ScheduleFormMode};
use proptest::prelude::*;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn item(id: i64, day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> ScheduleItem {
    ScheduleItem {
        id,
        hall: None,
        hall_id: Some(1),
        group: None,
        group_id: Some(7),
        day_of_week: day,
        start_time: start,
        end_time: end,
    }
}

fn occupied(grid: &OccupancyGrid<'_>) -> Vec<(DayOfWeek, u32)> {
    grid.rows()
        .iter()
        .flat_map(|(slot, cells)| {
            cells.iter().filter_map(move |cell| match cell {
                Cell::Occupied(item) => Some((item.day_of_week, slot.hour)),
                Cell::Empty { .. } => None,
            })
        })
        .collect()
}

#[test]
fn test_tuesday_nine_to_ten() {
    let items = vec![item(1, DayOfWeek::Tuesday, t(9, 0), t(10, 0))];
    let grid = OccupancyGrid::build(&items, Some(1));
    assert_eq!(occupied(&grid), vec![(DayOfWeek::Tuesday, 9)]);
}

#[test]
fn test_friday_half_past_nine_to_eleven() {
    let items = vec![item(1, DayOfWeek::Friday, t(9, 30), t(11, 0))];
    let grid = OccupancyGrid::build(&items, Some(1));
    assert_eq!(
        occupied(&grid),
        vec![(DayOfWeek::Friday, 9), (DayOfWeek::Friday, 10)]
    );
}

#[test]
fn test_items_outside_opening_hours_never_match() {
    let items = vec![
        item(1, DayOfWeek::Monday, t(6, 0), t(8, 0)),
        item(2, DayOfWeek::Monday, t(23, 0), t(23, 30)),
    ];
    let grid = OccupancyGrid::build(&items, Some(1));
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_empty_hall_cells_open_create_forms() {
    let grid = OccupancyGrid::build(&[], Some(4));
    assert_eq!(grid.rows().len(), 15);

    for (slot, cells) in grid.rows() {
        assert_eq!(cells.len(), 7);
        for (cell, day) in cells.iter().zip(DayOfWeek::ALL) {
            let Cell::Empty {
                day: cell_day,
                hour,
                hall_id,
            } = *cell
            else {
                panic!("expected empty cell");
            };
            assert_eq!((cell_day, hour, hall_id), (day, slot.hour, Some(4)));

            let form = ScheduleForm::for_slot(cell_day, hour, hall_id);
            assert_eq!(form.mode, ScheduleFormMode::Create);
            assert_eq!(form.start, slot.start());
            assert_eq!(form.end, slot.end());
        }
    }
}

#[test]
fn test_occupied_cell_opens_edit_form() {
    let items = vec![item(42, DayOfWeek::Saturday, t(12, 0), t(14, 0))];
    let grid = OccupancyGrid::build(&items, Some(1));

    let cell = grid.cell(DayOfWeek::Saturday, 13).unwrap();
    let form = ScheduleForm::for_item(cell.item().unwrap());
    assert_eq!(form.mode, ScheduleFormMode::Edit(42));
    assert_eq!((form.start, form.end), (t(12, 0), t(14, 0)));
    assert_eq!(form.group_id, Some(7));
}

#[test]
fn test_render_contains_labels() {
    let items = vec![item(1, DayOfWeek::Monday, t(8, 0), t(9, 0))];
    let grid = OccupancyGrid::build(&items, Some(1));
    let text = grid.render(|_| "Salsa".to_string());

    assert!(text.contains("08:00 - 09:00"));
    assert!(text.contains("22:00 - 23:00"));
    assert!(text.contains("Salsa"));
    assert_eq!(text.lines().count(), 16);
}

fn day_strategy() -> impl Strategy<Value = DayOfWeek> {
    (0usize..7).prop_map(|i| DayOfWeek::ALL[i])
}

proptest! {
    #[test]
    fn prop_item_occupies_exactly_overlapping_slots(
        day in day_strategy(),
        start_min in 0u32..(24 * 60 - 1),
        len in 1u32..(6 * 60),
    ) {
        let end_min = (start_min + len).min(24 * 60 - 1);
        prop_assume!(end_min > start_min);

        let start = t(start_min / 60, start_min % 60);
        let end = t(end_min / 60, end_min % 60);
        let items = vec![item(1, day, start, end)];
        let grid = OccupancyGrid::build(&items, Some(1));

        for slot in HourSlot::all() {
            for other in DayOfWeek::ALL {
                let expected = other == day && start < slot.end() && end > slot.start();
                let cell = grid.cell(other, slot.hour).unwrap();
                prop_assert_eq!(cell.is_occupied(), expected);
            }
        }
    }
}
