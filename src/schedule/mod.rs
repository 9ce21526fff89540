//! Weekly schedule: occupancy grid and time-slot form
//!
//! The grid covers hour slots 08:00 through 22:00 (each one hour long, the
//! last ending at 23:00) for each day Monday to Sunday.

pub mod form;
pub mod grid;

pub use form::{ScheduleForm, ScheduleFormMode};
pub use grid::{items_for_hall, Cell, HourSlot, OccupancyGrid};

/// First hour slot start
pub const FIRST_HOUR: u32 = 8;

/// Last hour slot start
pub const LAST_HOUR: u32 = 22;

/// Latest possible end time hour
pub const CLOSING_HOUR: u32 = 23;
