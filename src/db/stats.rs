use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) DAYS PER STATUS
    //
    let (planned, done): (i64, i64) = pool.conn.query_row(
        "SELECT
             COALESCE(SUM(CASE WHEN status IN ('planned','working') THEN 1 ELSE 0 END), 0),
             COALESCE(SUM(CASE WHEN status = 'done' THEN 1 ELSE 0 END), 0)
         FROM calendar_days",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!(
        "{}• Planned days:{} {}{}{}",
        CYAN, RESET, YELLOW, planned, RESET
    );
    println!("{}• Done days:{} {}{}{}", CYAN, RESET, GREEN, done, RESET);

    //
    // 3) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(date), MAX(date) FROM calendar_days",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let placeholder = || format!("{GREY}--{RESET}");

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(placeholder));
    println!("    to:   {}", last.unwrap_or_else(placeholder));

    //
    // 4) TOTAL HOURS
    //
    let hours: f64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(hours_worked), 0.0) FROM calendar_days WHERE status = 'done'",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Hours logged:{} {:.2}", CYAN, RESET, hours);

    println!();
    Ok(())
}
