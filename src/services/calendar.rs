//! Month grid for date selection
//!
//! The grid is relative to "today": offset 0 is the current month, 1 the
//! next one. Weeks start on Monday.

use chrono::{Datelike, Months, NaiveDate};
use crate::utils::helpers::month_title;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first or after the last day of the month
    Empty,
    /// A day before today, shown but not selectable
    Past(NaiveDate),
    Selectable(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub offset: i32,
    pub first_day: NaiveDate,
    pub weeks: Vec<[CalendarCell; 7]>,
}

impl CalendarMonth {
    /// Build the grid for the month `offset` months away from `today`
    pub fn build(today: NaiveDate, offset: i32) -> Option<Self> {
        let first_day = month_start(today, offset)?;
        let next_month = first_day.checked_add_months(Months::new(1))?;

        let mut weeks = Vec::new();
        let mut week = [CalendarCell::Empty; 7];
        let mut column = first_day.weekday().num_days_from_monday() as usize;

        for date in first_day.iter_days().take_while(|d| *d < next_month) {
            week[column] = if date < today {
                CalendarCell::Past(date)
            } else {
                CalendarCell::Selectable(date)
            };

            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [CalendarCell::Empty; 7];
                column = 0;
            }
        }

        if column > 0 {
            weeks.push(week);
        }

        Some(Self {
            offset,
            first_day,
            weeks,
        })
    }

    /// Header text, e.g. "Октябрь 2026"
    pub fn title(&self) -> String {
        month_title(self.first_day)
    }

    pub fn selectable_days(&self) -> Vec<NaiveDate> {
        self.weeks
            .iter()
            .flatten()
            .filter_map(|cell| match cell {
                CalendarCell::Selectable(date) => Some(*date),
                _ => None,
            })
            .collect()
    }
}

/// First day of the month `offset` months away from `today`
pub fn month_start(today: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let first = today.with_day(1)?;
    let months = Months::new(offset.unsigned_abs());
    if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    }
}
