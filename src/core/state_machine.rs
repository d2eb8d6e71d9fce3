//! Status state machine for a single day.
//!
//! `plan` is pure: it looks at the current record (if any) and a user
//! command and decides which store effect, if any, the command needs. The
//! ledger service executes the effect; nothing here touches I/O.
//!
//! ```text
//! unplanned --schedule--> planned --mark done--> done
//!     ^                      |
//!     +-------remove---------+
//! ```
//! Note edits keep the current state; unplanned days cannot hold a note.

use crate::errors::{AppError, AppResult};
use crate::models::{DayPatch, DayRecord, DayStatus};
use crate::utils::time::hours_between;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::fmt;

/// Observable state of a day, including the virtual `Unplanned` state of a
/// date without a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayState {
    Unplanned,
    Scheduled,
    Done,
}

impl DayState {
    pub fn of(record: Option<&DayRecord>) -> Self {
        match record.map(|r| r.status) {
            None => DayState::Unplanned,
            Some(DayStatus::Scheduled) => DayState::Scheduled,
            Some(DayStatus::Done) => DayState::Done,
        }
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayState::Unplanned => "unplanned",
            DayState::Scheduled => "planned",
            DayState::Done => "done",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayCommand {
    Schedule,
    MarkDone { start: NaiveTime, end: NaiveTime },
    Remove,
    SetNote(Option<String>),
}

impl DayCommand {
    /// Build a note command; blank text clears the note.
    pub fn note(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            DayCommand::SetNote(None)
        } else {
            DayCommand::SetNote(Some(trimmed.to_string()))
        }
    }
}

/// What the store must do to apply a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Already in the requested state.
    Keep,
    Put(DayRecord),
    Merge(DayPatch),
    Delete,
}

pub fn plan(date: NaiveDate, current: Option<&DayRecord>, command: &DayCommand) -> AppResult<Effect> {
    let state = DayState::of(current);

    let invalid = |requested| AppError::InvalidTransition {
        current: state,
        requested,
    };

    match command {
        DayCommand::Schedule => match state {
            DayState::Unplanned => Ok(Effect::Put(DayRecord::scheduled(date))),
            DayState::Scheduled => Ok(Effect::Keep),
            DayState::Done => Err(invalid(DayState::Scheduled)),
        },

        DayCommand::MarkDone { start, end } => {
            if end <= start {
                return Err(AppError::Validation(format!(
                    "End time {} must be later than start time {}",
                    end.format("%H:%M"),
                    start.format("%H:%M")
                )));
            }
            match state {
                DayState::Scheduled => Ok(Effect::Merge(DayPatch::completion(
                    *start,
                    *end,
                    hours_between(*start, *end),
                ))),
                DayState::Unplanned | DayState::Done => Err(invalid(DayState::Done)),
            }
        }

        DayCommand::Remove => match state {
            DayState::Scheduled => Ok(Effect::Delete),
            DayState::Unplanned => Ok(Effect::Keep),
            DayState::Done => Err(invalid(DayState::Unplanned)),
        },

        DayCommand::SetNote(note) => match state {
            DayState::Unplanned => Err(invalid(DayState::Unplanned)),
            _ if current.and_then(|r| r.note.as_ref()) == note.as_ref() => Ok(Effect::Keep),
            _ => Ok(Effect::Merge(DayPatch::note(note.clone()))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn done_record() -> DayRecord {
        let mut r = DayRecord::scheduled(d());
        r.apply(&DayPatch::completion(t("09:00"), t("17:00"), 8.0));
        r
    }

    #[test]
    fn scheduling_creates_an_empty_planned_record() {
        let effect = plan(d(), None, &DayCommand::Schedule).unwrap();
        assert_eq!(effect, Effect::Put(DayRecord::scheduled(d())));
    }

    #[test]
    fn scheduling_twice_is_a_no_op() {
        let rec = DayRecord::scheduled(d());
        assert_eq!(plan(d(), Some(&rec), &DayCommand::Schedule).unwrap(), Effect::Keep);
    }

    #[test]
    fn mark_done_computes_hours() {
        let rec = DayRecord::scheduled(d());
        let cmd = DayCommand::MarkDone {
            start: t("09:00"),
            end: t("13:30"),
        };
        match plan(d(), Some(&rec), &cmd).unwrap() {
            Effect::Merge(patch) => {
                assert_eq!(patch.hours_worked, Some(Some(4.5)));
                assert_eq!(patch.status, Some(DayStatus::Done));
                assert_eq!(patch.note, None, "note must stay untouched");
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn unplanned_day_cannot_jump_to_done() {
        let cmd = DayCommand::MarkDone {
            start: t("09:00"),
            end: t("17:00"),
        };
        let err = plan(d(), None, &cmd).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidTransition {
                current: DayState::Unplanned,
                requested: DayState::Done
            }
        ));
    }

    #[test]
    fn end_not_after_start_is_a_validation_error() {
        let rec = DayRecord::scheduled(d());
        for (s, e) in [("18:00", "09:00"), ("09:00", "09:00")] {
            let cmd = DayCommand::MarkDone { start: t(s), end: t(e) };
            let err = plan(d(), Some(&rec), &cmd).unwrap_err();
            assert!(err.is_validation(), "{s}-{e}: {err}");
        }
    }

    #[test]
    fn done_days_cannot_be_removed_or_rescheduled() {
        let rec = done_record();
        assert!(matches!(
            plan(d(), Some(&rec), &DayCommand::Remove),
            Err(AppError::InvalidTransition {
                current: DayState::Done,
                requested: DayState::Unplanned
            })
        ));
        assert!(matches!(
            plan(d(), Some(&rec), &DayCommand::Schedule),
            Err(AppError::InvalidTransition {
                current: DayState::Done,
                requested: DayState::Scheduled
            })
        ));
    }

    #[test]
    fn removing_planned_day_deletes_it() {
        let rec = DayRecord::scheduled(d());
        assert_eq!(plan(d(), Some(&rec), &DayCommand::Remove).unwrap(), Effect::Delete);
        assert_eq!(plan(d(), None, &DayCommand::Remove).unwrap(), Effect::Keep);
    }

    #[test]
    fn notes_need_a_record() {
        let err = plan(d(), None, &DayCommand::note("x")).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));

        let effect = plan(d(), Some(&done_record()), &DayCommand::note("  x  ")).unwrap();
        assert_eq!(effect, Effect::Merge(DayPatch::note(Some("x".into()))));
    }

    #[test]
    fn blank_note_clears() {
        assert_eq!(DayCommand::note("   "), DayCommand::SetNote(None));
    }
}
