//! The six week grid of days shown for a month.

use std::iter::successors;

use time::{Date, Duration};

/// Number of days in the grid, six weeks of seven days.
pub const GRID_DAYS: usize = 42;

/// One day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// The day this cell shows.
    pub date: Date,
    /// The day belongs to the month before or after the displayed one and
    /// cannot be picked.
    pub is_other_month: bool,
    /// The day is today.
    pub is_today: bool,
    /// The day is the selected date.
    pub is_selected: bool,
}

impl CalendarCell {
    /// The CSS classes of the cell.
    pub fn class(&self) -> String {
        let mut class = String::from("datepicker-day");

        if self.is_other_month {
            class.push_str(" other-month");
        }
        if self.is_today {
            class.push_str(" today");
        }
        if self.is_selected {
            class.push_str(" selected");
        }

        class
    }
}

/// The grid for the month containing `view`.
///
/// The grid starts on the Sunday on or before the first of the month and runs
/// for six full weeks.
pub fn month_grid(view: Date, today: Date, selected: Option<Date>) -> Vec<CalendarCell> {
    let first_of_month = view.replace_day(1).unwrap_or(view);
    let days_since_sunday = first_of_month.weekday().number_days_from_sunday();
    let start = first_of_month
        .checked_sub(Duration::days(days_since_sunday.into()))
        .unwrap_or(first_of_month);

    successors(Some(start), |date| date.next_day())
        .take(GRID_DAYS)
        .map(|date| CalendarCell {
            date,
            is_other_month: date.month() != first_of_month.month()
                || date.year() != first_of_month.year(),
            is_today: date == today,
            is_selected: selected == Some(date),
        })
        .collect()
}
