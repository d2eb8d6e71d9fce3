use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Create or upgrade the schema. Pending migrations run in one transaction,
/// so a failed upgrade leaves the file untouched.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    run_pending_migrations(&tx)?;
    tx.commit()?;
    Ok(())
}
