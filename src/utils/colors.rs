/// ANSI color helper utilities for terminal output.
use crate::models::DayStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Status color used by the month view:
/// planned → yellow, done → green, no record → grey
pub fn color_for_status(status: Option<DayStatus>) -> &'static str {
    match status {
        Some(DayStatus::Scheduled) => YELLOW,
        Some(DayStatus::Done) => GREEN,
        None => GREY,
    }
}

/// Returns the value wrapped in GREY when it is an empty placeholder.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
