//! Date arithmetic for the monthly accrual grid.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::errors::{PlacementError, Result};

/// `date` shifted by `months`, clamped to the end of shorter months
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| PlacementError::InvalidConfiguration {
            message: format!("{date} plus {months} months is out of range"),
        })
}

/// first 1st or 16th of a month on or after `date`
pub fn next_fortnight_start(date: NaiveDate) -> Result<NaiveDate> {
    match date.day() {
        1 | 16 => Ok(date),
        2..=15 => date
            .with_day(16)
            .ok_or_else(|| PlacementError::InvalidConfiguration {
                message: format!("no 16th in the month of {date}"),
            }),
        _ => {
            let first = date.with_day(1).ok_or_else(|| PlacementError::InvalidConfiguration {
                message: format!("no 1st in the month of {date}"),
            })?;
            add_months(first, 1)
        }
    }
}

/// days from `start` to `end`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// one month of the accrual grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// 0-based position on the grid
    pub index: u32,
    pub start: NaiveDate,
    /// day before the next grid date, or the end date for a partial tail
    pub last_day: NaiveDate,
    /// true when the end date cut the period short
    pub partial: bool,
}

impl Period {
    /// accrued day count, first day to last day
    pub fn days(&self) -> i64 {
        days_between(self.start, self.last_day)
    }
}

/// monthly grid anchored on a start date
///
/// Grid dates are computed from the anchor each time, so a start on the
/// 31st lands on the last day of shorter months without drifting.
#[derive(Debug, Clone)]
pub struct PeriodGrid {
    anchor: NaiveDate,
    end: Option<NaiveDate>,
    next_index: u32,
    done: bool,
}

impl PeriodGrid {
    /// grid from `anchor` stopping when a period start reaches `end`
    pub fn bounded(anchor: NaiveDate, end: NaiveDate) -> Self {
        Self {
            anchor,
            end: Some(end),
            next_index: 0,
            done: false,
        }
    }

    /// grid with no end date
    pub fn unbounded(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            end: None,
            next_index: 0,
            done: false,
        }
    }

    fn period(&self, index: u32) -> Result<Option<Period>> {
        let start = add_months(self.anchor, index)?;
        if self.end.is_some_and(|end| start >= end) {
            return Ok(None);
        }
        let natural_last_day = add_months(self.anchor, index + 1)?
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| PlacementError::InvalidConfiguration {
                message: format!("period {index} from {start} is out of range"),
            })?;
        let (last_day, partial) = match self.end {
            Some(end) if end < natural_last_day => (end, true),
            _ => (natural_last_day, false),
        };
        Ok(Some(Period {
            index,
            start,
            last_day,
            partial,
        }))
    }
}

impl Iterator for PeriodGrid {
    type Item = Result<Period>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.period(self.next_index) {
            Ok(Some(period)) => {
                self.next_index += 1;
                Some(Ok(period))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
