pub mod aggregation;
pub mod clock;
pub mod ledger;
pub mod log;
pub mod state_machine;
pub mod window;

pub use ledger::{Applied, LedgerService};
