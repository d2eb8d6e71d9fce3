//! Aggregation engine: reduces day records into hour and earnings totals,
//! and finds the next scheduled work day.
//!
//! Totals are never rounded here; earnings are always `hours × rate`.

use crate::core::window::{CalendarWindow, week_window};
use crate::models::{DayRecord, UserProfile};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSummary {
    pub total_hours: f64,
    pub total_earnings: f64,
    pub days_worked: usize,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextWorkDay {
    pub date: NaiveDate,
    pub days_until: i64,
}

/// Sum the `done` records among `records`.
pub fn summarize<'a, I>(records: I, profile: &UserProfile) -> WorkSummary
where
    I: IntoIterator<Item = &'a DayRecord>,
{
    let (total_hours, days_worked) = records
        .into_iter()
        .filter(|r| r.status.is_done())
        .fold((0.0, 0), |(hours, days), r| (hours + r.hours(), days + 1));

    WorkSummary {
        total_hours,
        total_earnings: total_hours * profile.salary_rate,
        days_worked,
        currency: profile.currency.clone(),
    }
}

/// Totals for the Monday–Sunday week containing `today`.
pub fn weekly_summary(
    records: &BTreeMap<NaiveDate, DayRecord>,
    profile: &UserProfile,
    today: NaiveDate,
) -> WorkSummary {
    summarize(in_window(records, week_window(today)), profile)
}

/// Totals over `records`, which the caller has already scoped to one month.
pub fn monthly_summary(records: &BTreeMap<NaiveDate, DayRecord>, profile: &UserProfile) -> WorkSummary {
    summarize(records.values(), profile)
}

/// Earliest scheduled day on or after `today`.
pub fn next_work_day(records: &BTreeMap<NaiveDate, DayRecord>, today: NaiveDate) -> Option<NextWorkDay> {
    records
        .range(today..)
        .find(|(_, r)| r.status.is_scheduled())
        .map(|(date, _)| NextWorkDay {
            date: *date,
            days_until: (*date - today).num_days(),
        })
}

fn in_window(
    records: &BTreeMap<NaiveDate, DayRecord>,
    window: CalendarWindow,
) -> impl Iterator<Item = &DayRecord> {
    records.range(window.start..=window.end).map(|(_, r)| r)
}
