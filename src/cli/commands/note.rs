use crate::cli::commands::AppContext;
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date_key;

pub async fn handle(cmd: &Commands, app: &AppContext) -> AppResult<()> {
    if let Commands::Note { date, text } = cmd {
        let d = parse_date_key(date)?;
        let outcome = app.ledger.set_note(d, text).await?;
        let key = outcome.record.date_key();

        if !outcome.changed {
            info(format!("Note for {} unchanged", key));
            return Ok(());
        }

        // only the kind of edit is logged, never the text
        if outcome.record.note.is_some() {
            success(format!("Note saved for {}", key));
            app.audit("note", &key, "Note updated").await;
        } else {
            success(format!("Note cleared for {}", key));
            app.audit("note", &key, "Note cleared").await;
        }
    }
    Ok(())
}
