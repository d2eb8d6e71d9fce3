use super::day_status::DayStatus;
use crate::utils::date::format_date_key;
use crate::utils::time::format_time;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One calendar date's work status.
///
/// `start_time`, `end_time` and `hours_worked` travel together: they are
/// only set on `Done` records and `hours_worked` is always derived from the
/// two clock times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,                // ⇔ calendar_days.date (TEXT "YYYY-MM-DD")
    pub status: DayStatus,              // ⇔ calendar_days.status ('planned' | 'working' | 'done')
    pub note: Option<String>,           // ⇔ calendar_days.note
    pub start_time: Option<NaiveTime>,  // ⇔ calendar_days.start_time (TEXT "HH:MM")
    pub end_time: Option<NaiveTime>,    // ⇔ calendar_days.end_time (TEXT "HH:MM")
    pub hours_worked: Option<f64>,      // ⇔ calendar_days.hours_worked (REAL)
}

impl DayRecord {
    /// A freshly scheduled day: no times, no hours, no note.
    pub fn scheduled(date: NaiveDate) -> Self {
        Self {
            date,
            status: DayStatus::Scheduled,
            note: None,
            start_time: None,
            end_time: None,
            hours_worked: None,
        }
    }

    /// Build a record from a partial update, filling missing fields with
    /// the defaults of a scheduled day.
    pub fn from_patch(date: NaiveDate, patch: &DayPatch) -> Self {
        let mut record = Self::scheduled(date);
        record.apply(patch);
        record
    }

    /// Overwrite only the fields named by `patch`.
    pub fn apply(&mut self, patch: &DayPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
        if let Some(start) = patch.start_time {
            self.start_time = start;
        }
        if let Some(end) = patch.end_time {
            self.end_time = end;
        }
        if let Some(hours) = patch.hours_worked {
            self.hours_worked = hours;
        }
    }

    pub fn date_key(&self) -> String {
        format_date_key(&self.date)
    }

    /// Hours counted by aggregations; a missing value counts as zero.
    pub fn hours(&self) -> f64 {
        self.hours_worked.unwrap_or(0.0)
    }

    pub fn to_document(&self) -> DayDocument {
        DayDocument {
            status: self.status.to_db_str().to_string(),
            note: self.note.clone(),
            start_time: self.start_time.map(|t| format_time(&t)),
            end_time: self.end_time.map(|t| format_time(&t)),
            hours_worked: self.hours_worked,
        }
    }
}

/// Partial update: `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayPatch {
    pub status: Option<DayStatus>,
    pub note: Option<Option<String>>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub hours_worked: Option<Option<f64>>,
}

impl DayPatch {
    pub fn note(note: Option<String>) -> Self {
        Self {
            note: Some(note),
            ..Self::default()
        }
    }

    pub fn completion(start: NaiveTime, end: NaiveTime, hours: f64) -> Self {
        Self {
            status: Some(DayStatus::Done),
            start_time: Some(Some(start)),
            end_time: Some(Some(end)),
            hours_worked: Some(Some(hours)),
            ..Self::default()
        }
    }
}

/// Wire form of a record, keyed externally by its date string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDocument {
    pub status: String,
    pub note: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub hours_worked: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn patch_leaves_unnamed_fields_alone() {
        let mut rec = DayRecord::scheduled(d("2024-06-10"));
        rec.apply(&DayPatch::completion(t("09:00"), t("17:30"), 8.5));
        rec.apply(&DayPatch::note(Some("late bus".into())));

        assert_eq!(rec.status, DayStatus::Done);
        assert_eq!(rec.start_time, Some(t("09:00")));
        assert_eq!(rec.hours_worked, Some(8.5));
        assert_eq!(rec.note.as_deref(), Some("late bus"));
    }

    #[test]
    fn merge_into_absent_record_defaults_to_planned() {
        let rec = DayRecord::from_patch(d("2024-06-10"), &DayPatch::note(Some("x".into())));
        assert_eq!(rec.status, DayStatus::Scheduled);
        assert_eq!(rec.hours_worked, None);
    }

    #[test]
    fn document_uses_camel_case_wire_names() {
        let mut rec = DayRecord::scheduled(d("2024-06-10"));
        rec.apply(&DayPatch::completion(t("09:00"), t("13:30"), 4.5));
        let json = serde_json::to_value(rec.to_document()).unwrap();

        assert_eq!(json["status"], "done");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "13:30");
        assert_eq!(json["hoursWorked"], 4.5);
        assert!(json["note"].is_null());
    }

    #[test]
    fn planned_document_carries_no_times() {
        let json = serde_json::to_value(DayRecord::scheduled(d("2024-06-12")).to_document()).unwrap();
        assert_eq!(json["status"], "planned");
        assert!(json["startTime"].is_null());
        assert!(json["hoursWorked"].is_null());
    }
}
