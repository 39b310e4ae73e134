//! Month grid enumeration: a fixed 6×7 block of dates around one month.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{CalGridError, CalGridResult};

/// Cells in a month grid (6 weeks of 7 days).
pub const GRID_CELLS: usize = 42;

/// Where a cell's date sits relative to the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellPosition {
    Previous,
    Current,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub position: CellPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Weekday index of the 1st, Sunday = 0; also the number of leading cells
    pub first_weekday: u32,
    pub days_in_month: u32,
    pub cells: Vec<MonthCell>,
}

impl MonthGrid {
    pub fn leading(&self) -> &[MonthCell] {
        &self.cells[..self.first_weekday as usize]
    }

    pub fn current(&self) -> &[MonthCell] {
        let start = self.first_weekday as usize;
        &self.cells[start..start + self.days_in_month as usize]
    }

    pub fn trailing(&self) -> &[MonthCell] {
        &self.cells[(self.first_weekday + self.days_in_month) as usize..]
    }

    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(super::DAYS_PER_WEEK)
    }
}

/// Number of days in a month, or None for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Build the 42-cell grid for a month, padded with the end of the previous
/// month and the start of the next.
pub fn month_grid(year: i32, month: u32) -> CalGridResult<MonthGrid> {
    let invalid = || CalGridError::InvalidDate(format!("{year:04}-{month:02}"));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let days_in_month = days_in_month(year, month).ok_or_else(invalid)?;
    let first_weekday = first.weekday().num_days_from_sunday();
    let grid_start = first
        .checked_sub_days(chrono::Days::new(first_weekday as u64))
        .ok_or_else(invalid)?;

    let cells = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let position = if date < first {
                CellPosition::Previous
            } else if date.month() == month && date.year() == year {
                CellPosition::Current
            } else {
                CellPosition::Next
            };
            MonthCell { date, position }
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        first_weekday,
        days_in_month,
        cells,
    })
}
