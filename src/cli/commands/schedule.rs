use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date_key;

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Schedule { date } = cmd {
        let d = parse_date_key(date)?;
        let outcome = app.ledger.schedule_day(d).await?;
        let key = outcome.record.date_key();

        if !outcome.changed {
            info(format!("{} is already planned", key));
            return Ok(());
        }

        success(format!("{} planned", key));
        app.audit("schedule", &key, "Day planned").await;
    }
    Ok(())
}
