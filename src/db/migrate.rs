use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `calendar_days` table exists.
fn calendar_days_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='calendar_days'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `calendar_days` table.
///
/// `date` is the zero-padded `YYYY-MM-DD` key, so text ordering is date
/// ordering and range queries can use `BETWEEN`.
fn create_calendar_days_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS calendar_days (
            date          TEXT PRIMARY KEY NOT NULL,
            status        TEXT NOT NULL DEFAULT 'planned'
                          CHECK(status IN ('planned','working','done')),
            note          TEXT,
            start_time    TEXT,
            end_time      TEXT,
            hours_worked  REAL CHECK(hours_worked IS NULL OR hours_worked >= 0),
            updated_at    TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

/// Rows imported from older calendars may carry the `working` label for a
/// scheduled day. Rewrite them once as `planned`.
fn migrate_working_status_to_planned(conn: &Connection) -> Result<()> {
    let version = "20240601_0002_working_to_planned";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    let changed = conn.execute(
        "UPDATE calendar_days SET status = 'planned' WHERE status = 'working'",
        [],
    )?;

    mark_migration(conn, version, "Normalized legacy 'working' status to 'planned'")?;

    if changed > 0 {
        success(format!(
            "Migration applied: {} → {} day(s) relabelled as planned",
            version, changed
        ));
    }

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create calendar table if missing
    if !calendar_days_table_exists(conn)? {
        create_calendar_days_table(conn)?;
        mark_migration(conn, "20240601_0001_calendar_days", "Created calendar_days table")?;
    }

    // 3) Data fixes
    migrate_working_status_to_planned(conn)?;

    Ok(())
}
