use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_key;
use crate::utils::formatting::format_hours;
use crate::utils::time::{format_time, parse_required_time};

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Done { date, start, end } = cmd {
        let d = parse_date_key(date)?;
        let start = parse_required_time(start)?;
        let end = parse_required_time(end)?;

        let rec = app.ledger.mark_done(d, start, end).await?.record;
        let hours = format_hours(rec.hours());

        success(format!(
            "{} done: {} → {} ({})",
            rec.date_key(),
            format_time(&start),
            format_time(&end),
            hours
        ));
        app.audit("done", &rec.date_key(), &format!("Worked {}", hours))
            .await;
    }
    Ok(())
}
