use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use crate::utils::date::{format_date_key, parse_date_key};

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Remove { date, yes } = cmd {
        let d = parse_date_key(date)?;
        let key = format_date_key(&d);

        if !*yes && !confirm(&format!("Unplan {}?", key))? {
            info("Nothing removed.");
            return Ok(());
        }

        if !app.ledger.remove_day(d).await? {
            info(format!("{} was not planned", key));
            return Ok(());
        }

        success(format!("{} unplanned", key));
        app.audit("remove", &key, "Day unplanned").await;
    }
    Ok(())
}
