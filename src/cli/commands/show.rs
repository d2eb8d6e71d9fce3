use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::core::aggregation::WorkSummary;
use crate::errors::{AppError, AppResult};
use crate::models::{DayDocument, DayRecord};
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::date::all_days_of_month;
use crate::utils::formatting::{format_hours, format_money};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_time;
use std::collections::BTreeMap;

const NOTE_WIDTH: usize = 36;

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Show { month, json } = cmd {
        let ym = app.month_or_current(month.as_deref())?;
        let records = app.ledger.load_month(ym).await?;

        if *json {
            let docs: BTreeMap<String, DayDocument> = records
                .values()
                .map(|r| (r.date_key(), r.to_document()))
                .collect();
            let out = serde_json::to_string_pretty(&docs)
                .map_err(|e| AppError::Other(format!("JSON encoding failed: {}", e)))?;
            println!("{}", out);
            return Ok(());
        }

        header(ym.first_day().format("%B %Y"));

        let mut table = Table::new(vec![
            Column::new("DATE", 10),
            Column::new("DAY", 3),
            Column::new("STATUS", 7),
            Column::new("IN", 5),
            Column::new("OUT", 5),
            Column::new("HOURS", 6),
            Column::new("NOTE", NOTE_WIDTH),
        ]);

        for day in all_days_of_month(ym.year(), ym.month()) {
            let rec = records.get(&day);
            let mut rows = day_rows(rec);
            if let Some(first) = rows.first_mut() {
                first[0] = day.format("%Y-%m-%d").to_string();
                first[1] = day.format("%a").to_string();
            }
            for row in rows {
                table.add_row(row);
            }
        }

        print!("{}", table.render());

        let summary = app.ledger.monthly_stats().await?;
        print_totals(&summary);
    }
    Ok(())
}

/// Table lines for one day; long notes wrap onto continuation lines.
fn day_rows(rec: Option<&DayRecord>) -> Vec<Vec<String>> {
    let color = color_for_status(rec.map(|r| r.status));
    let status = match rec {
        Some(r) => format!("{}{}{}", color, r.status.to_db_str(), RESET),
        None => colorize_optional("-"),
    };

    let time_cell = |t: Option<chrono::NaiveTime>| match t {
        Some(t) => format_time(&t),
        None => colorize_optional("--:--"),
    };

    let start = time_cell(rec.and_then(|r| r.start_time));
    let end = time_cell(rec.and_then(|r| r.end_time));
    let hours = match rec.and_then(|r| r.hours_worked) {
        Some(h) => format_hours(h),
        None => colorize_optional("-"),
    };

    let note_lines: Vec<String> = rec
        .and_then(|r| r.note.as_deref())
        .map(|n| {
            textwrap::wrap(n, NOTE_WIDTH)
                .into_iter()
                .map(|l| l.into_owned())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = vec![vec![
        String::new(),
        String::new(),
        status,
        start,
        end,
        hours,
        note_lines.first().cloned().unwrap_or_default(),
    ]];

    for line in note_lines.into_iter().skip(1) {
        let mut row = vec![String::new(); 6];
        row.push(line);
        rows.push(row);
    }

    rows
}

fn print_totals(summary: &WorkSummary) {
    println!();
    println!(
        "Days worked: {}   Hours: {}   Earnings: {}",
        summary.days_worked,
        format_hours(summary.total_hours),
        format_money(summary.total_earnings, &summary.currency)
    );
}
