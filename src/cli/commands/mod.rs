pub mod config;
pub mod db;
pub mod done;
pub mod init;
pub mod log;
pub mod note;
pub mod remove;
pub mod schedule;
pub mod show;
pub mod stats;

use crate::config::Config;
use crate::core::LedgerService;
use crate::core::clock::FixedClock;
use crate::errors::AppResult;
use crate::models::YearMonth;
use crate::store::SqliteDayStore;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::sync::Arc;

/// What the day commands run against: the SQLite store, the ledger over it
/// and the loaded configuration (which also serves the pay profile).
pub struct AppContext {
    pub cfg: Arc<Config>,
    pub store: Arc<SqliteDayStore>,
    pub ledger: LedgerService,
}

impl AppContext {
    pub fn open(cfg: Config, today: Option<NaiveDate>) -> AppResult<Self> {
        let cfg = Arc::new(cfg);
        let store = Arc::new(SqliteDayStore::open(&cfg.database)?);

        let mut ledger = LedgerService::new(store.clone(), cfg.clone());
        if let Some(day) = today {
            ledger = ledger.with_clock(Arc::new(FixedClock(day)));
        }

        Ok(Self { cfg, store, ledger })
    }

    /// Record a completed command in the internal log (non blocking).
    pub async fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.audit(operation, target, message).await {
            warning(format!("Failed to write internal log: {}", e));
        }
    }

    /// `--month` value, or the month containing today.
    pub fn month_or_current(&self, month: Option<&str>) -> AppResult<YearMonth> {
        match month {
            Some(m) => m.parse(),
            None => Ok(YearMonth::from_date(self.ledger.today())),
        }
    }
}
