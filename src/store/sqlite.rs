//! SQLite-backed day store.
//!
//! rusqlite is blocking, so each call runs on `spawn_blocking` with the
//! single connection behind a mutex.

use super::DayStore;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_day, load_day, load_range, upsert_day};
use crate::errors::{AppError, AppResult};
use crate::models::{DayPatch, DayRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tokio::task;

pub struct SqliteDayStore {
    pool: Arc<Mutex<DbPool>>,
}

impl SqliteDayStore {
    /// Open (creating if needed) the database at `path` and run migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;

        Ok(Self {
            pool: Arc::new(Mutex::new(pool)),
        })
    }

    /// Append a line to the internal `log` table.
    pub async fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let (operation, target, message) =
            (operation.to_string(), target.to_string(), message.to_string());
        self.run(move |pool| ttlog(&pool.conn, &operation, &target, &message))
            .await
    }

    async fn run<F, T>(&self, job: F) -> AppResult<T>
    where
        F: FnOnce(&mut DbPool) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || -> AppResult<T> {
            let mut guard = pool
                .lock()
                .map_err(|_| AppError::StoreUnavailable("connection lock poisoned".into()))?;
            job(&mut guard)
        })
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("blocking task failed: {}", e)))?
        .map_err(map_store_error)
    }
}

/// Backend failures surface as `StoreUnavailable`; caller-input errors pass through.
fn map_store_error(err: AppError) -> AppError {
    match err {
        AppError::Db(e) => AppError::StoreUnavailable(e.to_string()),
        AppError::Io(e) => AppError::StoreUnavailable(e.to_string()),
        other => other,
    }
}

#[async_trait]
impl DayStore for SqliteDayStore {
    async fn get(&self, date: NaiveDate) -> AppResult<Option<DayRecord>> {
        self.run(move |pool| load_day(&pool.conn, &date)).await
    }

    async fn put(&self, record: &DayRecord) -> AppResult<()> {
        let record = record.clone();
        self.run(move |pool| upsert_day(&pool.conn, &record)).await
    }

    async fn merge(&self, date: NaiveDate, patch: &DayPatch) -> AppResult<DayRecord> {
        let patch = patch.clone();

        self.run(move |pool| {
            let merged = pool.with_conn(|conn| {
                let tx = conn.transaction()?;
                let rec = match load_day(&tx, &date).map_err(into_sqlite_error)? {
                    Some(mut rec) => {
                        rec.apply(&patch);
                        rec
                    }
                    None => DayRecord::from_patch(date, &patch),
                };

                upsert_day(&tx, &rec).map_err(into_sqlite_error)?;

                tx.commit()?;
                Ok(rec)
            })?;
            Ok(merged)
        })
        .await
    }

    async fn delete(&self, date: NaiveDate) -> AppResult<()> {
        self.run(move |pool| delete_day(&pool.conn, &date)).await
    }

    async fn query_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<BTreeMap<NaiveDate, DayRecord>> {
        self.run(move |pool| load_range(&pool.conn, &start, &end))
            .await
    }
}

fn into_sqlite_error(err: AppError) -> rusqlite::Error {
    match err {
        AppError::Db(e) => e,
        other => rusqlite::Error::ToSqlConversionFailure(Box::new(other)),
    }
}
