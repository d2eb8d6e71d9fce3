//! Port interfaces for day persistence and profile lookup.
//!
//! The ledger depends only on these traits. Backing stores map every
//! backend failure to `AppError::StoreUnavailable` and never retry.

pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::{DayPatch, DayRecord, UserProfile};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::broadcast;

pub use memory::MemoryDayStore;
pub use sqlite::SqliteDayStore;

/// Keyed persistence for day records.
#[async_trait]
pub trait DayStore: Send + Sync {
    /// Absent dates yield `None`, never an error.
    async fn get(&self, date: NaiveDate) -> AppResult<Option<DayRecord>>;

    /// Full overwrite; creates the record if absent.
    async fn put(&self, record: &DayRecord) -> AppResult<()>;

    /// Update only the fields named by `patch`, creating the record with
    /// default fields if absent. Returns the stored result.
    async fn merge(&self, date: NaiveDate, patch: &DayPatch) -> AppResult<DayRecord>;

    async fn delete(&self, date: NaiveDate) -> AppResult<()>;

    /// Records stored within `start..=end`; dates without a record are omitted.
    async fn query_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<BTreeMap<NaiveDate, DayRecord>>;
}

/// A record change pushed by a store that supports live updates.
/// `record == None` means the date was deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct DayChange {
    pub date: NaiveDate,
    pub record: Option<DayRecord>,
}

/// Optional push capability, separate from the one-shot `DayStore` calls.
pub trait DayFeed: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<DayChange>;
}

/// Read-only access to the user's pay settings.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile(&self) -> AppResult<UserProfile>;
}

#[async_trait]
impl ProfileSource for UserProfile {
    async fn profile(&self) -> AppResult<UserProfile> {
        Ok(self.clone())
    }
}
