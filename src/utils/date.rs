//! Date utilities: strict `YYYY-MM-DD` keys, month day lists, today.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn date_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"))
}

/// Parse a store key. Only the zero-padded `YYYY-MM-DD` form is accepted,
/// so keys sort lexicographically in date order.
pub fn parse_date_key(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if !date_key_re().is_match(s) {
        return Err(AppError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn format_date_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn all_days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let Some(mut d) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return out;
    };

    while d.month() == month {
        out.push(d);
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_keys_must_be_zero_padded() {
        assert!(parse_date_key("2024-06-01").is_ok());
        assert!(parse_date_key("2024-6-1").is_err());
        assert!(parse_date_key("2024-02-30").is_err());
        assert!(parse_date_key("tomorrow").is_err());
    }

    #[test]
    fn month_day_list_follows_calendar_length() {
        assert_eq!(all_days_of_month(2023, 2).len(), 28);
        assert_eq!(all_days_of_month(2024, 2).len(), 29);
        assert_eq!(all_days_of_month(2024, 4).len(), 30);
        assert_eq!(all_days_of_month(2024, 12).len(), 31);
    }
}
