//! In-process day store.
//!
//! Backs the ledger in tests and offline sessions. It also publishes every
//! change on a broadcast channel, and can simulate outages and slow range
//! queries.

use super::{DayChange, DayFeed, DayStore};
use crate::errors::{AppError, AppResult};
use crate::models::{DayPatch, DayRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};

const FEED_CAPACITY: usize = 64;

pub struct MemoryDayStore {
    days: RwLock<BTreeMap<NaiveDate, DayRecord>>,
    offline: AtomicBool,
    range_queries: AtomicUsize,
    // keyed by window start date
    range_latency: Mutex<HashMap<NaiveDate, Duration>>,
    changes: broadcast::Sender<DayChange>,
}

impl Default for MemoryDayStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDayStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            days: RwLock::new(BTreeMap::new()),
            offline: AtomicBool::new(false),
            range_queries: AtomicUsize::new(0),
            range_latency: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Seed the store without publishing changes.
    pub fn with_records(records: impl IntoIterator<Item = DayRecord>) -> Self {
        let mut store = Self::new();
        let seeded = records.into_iter().map(|r| (r.date, r)).collect();
        store.days = RwLock::new(seeded);
        store
    }

    /// While offline every call fails with `StoreUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Delay results of range queries starting at `start`. The data is read
    /// before the delay, like a response already in flight.
    pub fn set_range_latency(&self, start: NaiveDate, delay: Duration) {
        if let Ok(mut map) = self.range_latency.lock() {
            map.insert(start, delay);
        }
    }

    /// Number of `query_range` calls served so far.
    pub fn range_query_count(&self) -> usize {
        self.range_queries.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable("memory store is offline".into()));
        }
        Ok(())
    }

    fn publish(&self, date: NaiveDate, record: Option<DayRecord>) {
        // no subscribers is fine
        let _ = self.changes.send(DayChange { date, record });
    }

    fn latency_for(&self, start: NaiveDate) -> Option<Duration> {
        self.range_latency
            .lock()
            .ok()
            .and_then(|map| map.get(&start).copied())
    }
}

#[async_trait]
impl DayStore for MemoryDayStore {
    async fn get(&self, date: NaiveDate) -> AppResult<Option<DayRecord>> {
        self.ensure_online()?;
        Ok(self.days.read().await.get(&date).cloned())
    }

    async fn put(&self, record: &DayRecord) -> AppResult<()> {
        self.ensure_online()?;
        self.days.write().await.insert(record.date, record.clone());
        self.publish(record.date, Some(record.clone()));
        Ok(())
    }

    async fn merge(&self, date: NaiveDate, patch: &DayPatch) -> AppResult<DayRecord> {
        self.ensure_online()?;
        let merged = {
            let mut days = self.days.write().await;
            match days.get_mut(&date) {
                Some(rec) => {
                    rec.apply(patch);
                    rec.clone()
                }
                None => {
                    let rec = DayRecord::from_patch(date, patch);
                    days.insert(date, rec.clone());
                    rec
                }
            }
        };
        self.publish(date, Some(merged.clone()));
        Ok(merged)
    }

    async fn delete(&self, date: NaiveDate) -> AppResult<()> {
        self.ensure_online()?;
        let removed = self.days.write().await.remove(&date);
        if removed.is_some() {
            self.publish(date, None);
        }
        Ok(())
    }

    async fn query_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<BTreeMap<NaiveDate, DayRecord>> {
        self.range_queries.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        let snapshot: BTreeMap<NaiveDate, DayRecord> = if start <= end {
            self.days
                .read()
                .await
                .range(start..=end)
                .map(|(d, r)| (*d, r.clone()))
                .collect()
        } else {
            BTreeMap::new()
        };

        if let Some(delay) = self.latency_for(start) {
            tokio::time::sleep(delay).await;
        }

        Ok(snapshot)
    }
}

impl DayFeed for MemoryDayStore {
    fn subscribe(&self) -> broadcast::Receiver<DayChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn range_query_omits_absent_dates() {
        let store = MemoryDayStore::with_records(vec![
            DayRecord::scheduled(d("2024-05-31")),
            DayRecord::scheduled(d("2024-06-01")),
            DayRecord::scheduled(d("2024-06-30")),
            DayRecord::scheduled(d("2024-07-01")),
        ]);
        let june = store.query_range(d("2024-06-01"), d("2024-06-30")).await.unwrap();
        let keys: Vec<NaiveDate> = june.keys().copied().collect();
        assert_eq!(keys, vec![d("2024-06-01"), d("2024-06-30")]);
    }

    #[tokio::test]
    async fn merge_creates_missing_record() {
        let store = MemoryDayStore::new();
        let merged = store
            .merge(d("2024-06-03"), &DayPatch::note(Some("hi".into())))
            .await
            .unwrap();
        assert_eq!(merged.note.as_deref(), Some("hi"));
        assert_eq!(store.get(d("2024-06-03")).await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn offline_store_reports_unavailable() {
        let store = MemoryDayStore::new();
        store.set_offline(true);
        let err = store.get(d("2024-06-03")).await.unwrap_err();
        assert!(err.is_store_unavailable());
        store.set_offline(false);
        assert!(store.get(d("2024-06-03")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn writes_are_published() {
        let store = MemoryDayStore::new();
        let mut rx = store.subscribe();
        store.put(&DayRecord::scheduled(d("2024-06-03"))).await.unwrap();
        store.delete(d("2024-06-03")).await.unwrap();

        let first = rx.recv().await.unwrap();
        assert!(first.record.is_some());
        let second = rx.recv().await.unwrap();
        assert_eq!(second, DayChange { date: d("2024-06-03"), record: None });
    }
}
