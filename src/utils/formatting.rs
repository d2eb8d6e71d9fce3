//! Formatting utilities used for CLI outputs.

/// `8` → "8h", `8.5` → "8.50h"
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}h", hours as i64)
    } else {
        format!("{:.2}h", hours)
    }
}

/// Rounds to cents for display only.
pub fn format_money(amount: f64, currency: &str) -> String {
    if amount.fract() == 0.0 {
        format!("{} {}", currency, amount as i64)
    } else {
        format!("{} {:.2}", currency, amount)
    }
}

/// Phrase a day distance: "today", "tomorrow", "in N days".
pub fn describe_days_until(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}
