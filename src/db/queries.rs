use crate::errors::{AppError, AppResult};
use crate::models::{DayRecord, DayStatus};
use crate::utils::date::{format_date_key, parse_date_key};
use crate::utils::time::{format_time, parse_time};
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

const DAY_COLUMNS: &str = "date, status, note, start_time, end_time, hours_worked";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn map_time(idx: usize, raw: Option<String>) -> Result<Option<NaiveTime>> {
    match raw {
        Some(s) => parse_time(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(idx, AppError::InvalidTime(s))),
        None => Ok(None),
    }
}

pub fn map_row(row: &Row) -> Result<DayRecord> {
    let date_str: String = row.get("date")?;
    let date = parse_date_key(&date_str).map_err(|e| conversion_error(0, e))?;

    let status_str: String = row.get("status")?;
    let status = DayStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(
            1,
            AppError::Validation(format!("Invalid status: {}", status_str)),
        )
    })?;

    Ok(DayRecord {
        date,
        status,
        note: row.get("note")?,
        start_time: map_time(3, row.get("start_time")?)?,
        end_time: map_time(4, row.get("end_time")?)?,
        hours_worked: row.get("hours_worked")?,
    })
}

pub fn load_day(conn: &Connection, date: &NaiveDate) -> AppResult<Option<DayRecord>> {
    let sql = format!("SELECT {DAY_COLUMNS} FROM calendar_days WHERE date = ?1");
    let rec = conn
        .query_row(&sql, [format_date_key(date)], map_row)
        .optional()?;
    Ok(rec)
}

/// Records with `start <= date <= end`, ordered by date.
pub fn load_range(
    conn: &Connection,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<BTreeMap<NaiveDate, DayRecord>> {
    let sql = format!(
        "SELECT {DAY_COLUMNS} FROM calendar_days
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date ASC"
    );
    let mut stmt = conn.prepare_cached(&sql)?;

    let rows = stmt.query_map(
        params![format_date_key(start), format_date_key(end)],
        map_row,
    )?;

    let mut out = BTreeMap::new();
    for r in rows {
        let rec = r?;
        out.insert(rec.date, rec);
    }
    Ok(out)
}

/// Insert or fully overwrite the record for `rec.date`.
pub fn upsert_day(conn: &Connection, rec: &DayRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO calendar_days (date, status, note, start_time, end_time, hours_worked, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(date) DO UPDATE SET
             status = excluded.status,
             note = excluded.note,
             start_time = excluded.start_time,
             end_time = excluded.end_time,
             hours_worked = excluded.hours_worked,
             updated_at = excluded.updated_at",
        params![
            rec.date_key(),
            rec.status.to_db_str(),
            rec.note,
            rec.start_time.map(|t| format_time(&t)),
            rec.end_time.map(|t| format_time(&t)),
            rec.hours_worked,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn delete_day(conn: &Connection, date: &NaiveDate) -> AppResult<()> {
    conn.execute(
        "DELETE FROM calendar_days WHERE date = ?1",
        [format_date_key(date)],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::models::DayPatch;

    fn conn() -> Connection {
        let c = Connection::open_in_memory().unwrap();
        init_db(&c).unwrap();
        c
    }

    fn d(s: &str) -> NaiveDate {
        parse_date_key(s).unwrap()
    }

    #[test]
    fn upsert_overwrites_every_column() {
        let c = conn();
        let mut rec = DayRecord::scheduled(d("2024-06-10"));
        rec.note = Some("first".into());
        upsert_day(&c, &rec).unwrap();

        let replacement = DayRecord::scheduled(d("2024-06-10"));
        upsert_day(&c, &replacement).unwrap();

        assert_eq!(load_day(&c, &d("2024-06-10")).unwrap(), Some(replacement));
    }

    #[test]
    fn legacy_working_rows_read_as_scheduled() {
        let c = conn();
        c.execute(
            "INSERT INTO calendar_days (date, status, updated_at) VALUES ('2024-06-11', 'working', '')",
            [],
        )
        .unwrap();
        let rec = load_day(&c, &d("2024-06-11")).unwrap().unwrap();
        assert_eq!(rec.status, DayStatus::Scheduled);
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let c = conn();
        for day in ["2024-06-30", "2024-06-01", "2024-07-01", "2024-05-31"] {
            upsert_day(&c, &DayRecord::scheduled(d(day))).unwrap();
        }
        let mut done = DayRecord::scheduled(d("2024-06-15"));
        done.apply(&DayPatch::completion(
            parse_time("09:00").unwrap(),
            parse_time("13:30").unwrap(),
            4.5,
        ));
        upsert_day(&c, &done).unwrap();

        let june = load_range(&c, &d("2024-06-01"), &d("2024-06-30")).unwrap();
        let keys: Vec<String> = june.keys().map(format_date_key).collect();
        assert_eq!(keys, vec!["2024-06-01", "2024-06-15", "2024-06-30"]);
        assert_eq!(june[&d("2024-06-15")], done);
    }
}
