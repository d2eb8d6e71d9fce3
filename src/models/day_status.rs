use serde::Serialize;

/// Stored status of a day record.
///
/// There is no `Unplanned` variant: an unplanned day simply has no record.
/// The legacy `working` label is read as `Scheduled` and never written back.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Scheduled,
    Done,
}

impl DayStatus {
    /// Convert enum → DB/wire string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayStatus::Scheduled => "planned",
            DayStatus::Done => "done",
        }
    }

    /// Convert DB/wire string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "planned" | "working" => Some(DayStatus::Scheduled),
            "done" => Some(DayStatus::Done),
            _ => None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, DayStatus::Scheduled)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, DayStatus::Done)
    }
}
