//! Calendar windows: the inclusive date ranges handed to range queries.
//! Everything here is a pure function of its reference date.

use crate::models::YearMonth;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Months touched by the window, in order. A week yields one or two.
    pub fn months(&self) -> Vec<YearMonth> {
        let last = YearMonth::from_date(self.end);
        let mut ym = YearMonth::from_date(self.start);
        let mut out = vec![ym];
        while ym != last {
            ym = ym.succ();
            out.push(ym);
        }
        out
    }
}

/// First through last calendar day of `ym`.
pub fn month_window(ym: YearMonth) -> CalendarWindow {
    CalendarWindow {
        start: ym.first_day(),
        end: ym.last_day(),
    }
}

/// ISO week (Monday..Sunday) containing `today`, across month boundaries.
pub fn week_window(today: NaiveDate) -> CalendarWindow {
    let offset = u64::from(today.weekday().num_days_from_monday());
    let monday = today.checked_sub_days(Days::new(offset)).unwrap_or(today);
    let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);

    CalendarWindow {
        start: monday,
        end: sunday,
    }
}
