//! Ledger service: the single API surface over the day store.
//!
//! Commands run the state machine against the store's current record, write
//! the resulting effect, then update the month cache in place. Reads come
//! from the cache, loading months from the store on a miss.
//!
//! Cache consistency rules:
//! - commands are serialized by `write_gate` across their read-modify-write;
//! - every write (local or pushed by a feed) bumps its month's generation,
//!   and a month load is cached only if the generation it started with is
//!   still current, so a slow load can never overwrite fresher data;
//! - loads for different months only touch their own entry.

use crate::core::aggregation::{self, NextWorkDay, WorkSummary};
use crate::core::clock::{Clock, SystemClock};
use crate::core::state_machine::{self, DayCommand, Effect};
use crate::core::window::{month_window, week_window};
use crate::errors::{AppError, AppResult};
use crate::models::{DayRecord, YearMonth};
use crate::store::{DayChange, DayFeed, DayStore, ProfileSource};
use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub type MonthRecords = BTreeMap<NaiveDate, DayRecord>;

#[derive(Default)]
struct CacheState {
    months: HashMap<YearMonth, MonthRecords>,
    generations: HashMap<YearMonth, u64>,
    active: Option<YearMonth>,
}

impl CacheState {
    fn generation(&self, ym: YearMonth) -> u64 {
        self.generations.get(&ym).copied().unwrap_or(0)
    }

    fn bump(&mut self, ym: YearMonth) {
        *self.generations.entry(ym).or_insert(0) += 1;
    }
}

pub struct LedgerService {
    store: Arc<dyn DayStore>,
    profiles: Arc<dyn ProfileSource>,
    clock: Arc<dyn Clock>,
    cache: RwLock<CacheState>,
    write_gate: Mutex<()>,
}

impl LedgerService {
    pub fn new(store: Arc<dyn DayStore>, profiles: Arc<dyn ProfileSource>) -> Self {
        Self {
            store,
            profiles,
            clock: Arc::new(SystemClock),
            cache: RwLock::new(CacheState::default()),
            write_gate: Mutex::new(()),
        }
    }

    /// Replace the time source (tests, `--today`).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ------------------------------------------------
    // Reads
    // ------------------------------------------------

    /// Records of `ym`, from cache when present. Marks `ym` as the active
    /// month used by [`monthly_stats`](Self::monthly_stats).
    pub async fn load_month(&self, ym: YearMonth) -> AppResult<MonthRecords> {
        self.state_mut().active = Some(ym);
        self.fetch_month(ym).await
    }

    /// Drop the cached copy of `ym` and load it again from the store.
    pub async fn reload_month(&self, ym: YearMonth) -> AppResult<MonthRecords> {
        {
            let mut st = self.state_mut();
            st.months.remove(&ym);
            st.bump(ym);
        }
        self.load_month(ym).await
    }

    /// Cached records of `ym` without touching the store.
    pub fn cached_month(&self, ym: YearMonth) -> Option<MonthRecords> {
        self.state().months.get(&ym).cloned()
    }

    pub fn active_month(&self) -> Option<YearMonth> {
        self.state().active
    }

    pub fn invalidate_all(&self) {
        let mut st = self.state_mut();
        let months: Vec<YearMonth> = st.months.keys().copied().collect();
        for ym in months {
            st.bump(ym);
        }
        st.months.clear();
    }

    async fn fetch_month(&self, ym: YearMonth) -> AppResult<MonthRecords> {
        let started_at = {
            let st = self.state();
            if let Some(cached) = st.months.get(&ym) {
                return Ok(cached.clone());
            }
            st.generation(ym)
        };

        let window = month_window(ym);
        let records = self
            .store
            .query_range(window.start, window.end)
            .await
            .inspect_err(|e| warn!(month = %ym, error = %e, kind = e.label(), "month_load_failed"))?;

        let mut st = self.state_mut();
        if st.generation(ym) == started_at {
            debug!(month = %ym, records = records.len(), "month_loaded");
            st.months.insert(ym, records.clone());
            Ok(records)
        } else {
            debug!(month = %ym, "stale_load_discarded");
            // a fresher copy may have been cached meanwhile
            Ok(st.months.get(&ym).cloned().unwrap_or(records))
        }
    }

    // ------------------------------------------------
    // Commands
    // ------------------------------------------------

    /// unplanned → planned. Idempotent on planned days.
    pub async fn schedule_day(&self, date: NaiveDate) -> AppResult<Applied> {
        let (rec, changed) = self.execute(date, DayCommand::Schedule).await?;
        if changed {
            info!(date = %date, "day_scheduled");
        }
        Applied::new(date, rec, changed)
    }

    /// planned → done with the given clock times.
    pub async fn mark_done(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<Applied> {
        let (rec, changed) = self
            .execute(date, DayCommand::MarkDone { start, end })
            .await?;
        info!(date = %date, hours = ?rec.as_ref().map(|r| r.hours()), "day_marked_done");
        Applied::new(date, rec, changed)
    }

    /// planned → unplanned. Removing an unplanned day is a no-op.
    /// Returns whether a record was deleted.
    pub async fn remove_day(&self, date: NaiveDate) -> AppResult<bool> {
        let (_, changed) = self.execute(date, DayCommand::Remove).await?;
        if changed {
            info!(date = %date, "day_removed");
        }
        Ok(changed)
    }

    /// Set or clear (blank `text`) the note of a planned or done day.
    pub async fn set_note(&self, date: NaiveDate, text: &str) -> AppResult<Applied> {
        let (rec, changed) = self.execute(date, DayCommand::note(text)).await?;
        if changed {
            info!(date = %date, cleared = text.trim().is_empty(), "note_set");
        }
        Applied::new(date, rec, changed)
    }

    /// Runs `command` against the stored record. The flag is false when the
    /// day was already in the requested state and nothing was written.
    async fn execute(
        &self,
        date: NaiveDate,
        command: DayCommand,
    ) -> AppResult<(Option<DayRecord>, bool)> {
        let _gate = self.write_gate.lock().await;

        let current = self.store.get(date).await?;
        let effect = state_machine::plan(date, current.as_ref(), &command)?;

        let result = match effect {
            Effect::Keep => return Ok((current, false)),
            Effect::Put(rec) => {
                self.store
                    .put(&rec)
                    .await
                    .inspect_err(|e| log_write_failure(date, "put", e))?;
                Some(rec)
            }
            Effect::Merge(patch) => Some(
                self.store
                    .merge(date, &patch)
                    .await
                    .inspect_err(|e| log_write_failure(date, "merge", e))?,
            ),
            Effect::Delete => {
                self.store
                    .delete(date)
                    .await
                    .inspect_err(|e| log_write_failure(date, "delete", e))?;
                None
            }
        };

        self.write_through(date, result.clone());
        Ok((result, true))
    }

    fn write_through(&self, date: NaiveDate, record: Option<DayRecord>) {
        let ym = YearMonth::from_date(date);
        let mut st = self.state_mut();
        st.bump(ym);

        if let Some(month) = st.months.get_mut(&ym) {
            match record {
                Some(rec) => {
                    month.insert(date, rec);
                }
                None => {
                    month.remove(&date);
                }
            }
        }
    }

    // ------------------------------------------------
    // Live updates
    // ------------------------------------------------

    /// Fold a change pushed by the store into the cache.
    pub fn apply_change(&self, change: DayChange) {
        debug!(date = %change.date, deleted = change.record.is_none(), "day_change_applied");
        self.write_through(change.date, change.record);
    }

    /// Keep the cache in sync with `feed` until the feed closes or the
    /// service is dropped.
    pub fn follow(self: &Arc<Self>, feed: &dyn DayFeed) -> JoinHandle<()> {
        let mut rx = feed.subscribe();
        let ledger = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) => match ledger.upgrade() {
                        Some(l) => l.apply_change(change),
                        None => break,
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "day_feed_lagged");
                        match ledger.upgrade() {
                            Some(l) => l.invalidate_all(),
                            None => break,
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    // ------------------------------------------------
    // Statistics
    // ------------------------------------------------

    /// Totals for the current Monday–Sunday week. Loads both months when the
    /// week straddles a month boundary.
    pub async fn weekly_stats(&self) -> AppResult<WorkSummary> {
        let today = self.today();

        let mut records = MonthRecords::new();
        for ym in week_window(today).months() {
            records.extend(self.fetch_month(ym).await?);
        }

        let profile = self.profiles.profile().await?;
        Ok(aggregation::weekly_summary(&records, &profile, today))
    }

    /// Totals for the active month (the last one loaded), or the current
    /// month when nothing was loaded yet.
    pub async fn monthly_stats(&self) -> AppResult<WorkSummary> {
        let ym = self
            .active_month()
            .unwrap_or_else(|| YearMonth::from_date(self.today()));
        self.monthly_stats_for(ym).await
    }

    pub async fn monthly_stats_for(&self, ym: YearMonth) -> AppResult<WorkSummary> {
        let records = self.fetch_month(ym).await?;
        let profile = self.profiles.profile().await?;
        Ok(aggregation::monthly_summary(&records, &profile))
    }

    /// Earliest planned day from today on, searched across every cached month
    /// plus the current and following month (loaded on demand).
    pub async fn next_work_day(&self) -> AppResult<Option<NextWorkDay>> {
        let today = self.today();
        let this_month = YearMonth::from_date(today);

        let mut records = MonthRecords::new();
        for ym in [this_month, this_month.succ()] {
            records.extend(self.fetch_month(ym).await?);
        }
        {
            let st = self.state();
            for (ym, month) in st.months.iter() {
                if *ym >= this_month {
                    records.extend(month.iter().map(|(d, r)| (*d, r.clone())));
                }
            }
        }

        Ok(aggregation::next_work_day(&records, today))
    }

    // ------------------------------------------------
    // Lock helpers
    // ------------------------------------------------

    fn state(&self) -> RwLockReadGuard<'_, CacheState> {
        self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Result of a command that leaves a record behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub record: DayRecord,
    /// False when the day already was in the requested state.
    pub changed: bool,
}

impl Applied {
    fn new(date: NaiveDate, record: Option<DayRecord>, changed: bool) -> AppResult<Self> {
        let record = record
            .ok_or_else(|| AppError::Other(format!("no record for {} after command", date)))?;
        Ok(Self { record, changed })
    }
}

fn log_write_failure(date: NaiveDate, op: &str, err: &AppError) {
    warn!(date = %date, op, error = %err, kind = err.label(), "store_write_failed");
}
