pub mod day_record;
pub mod day_status;
pub mod profile;
pub mod year_month;

pub use day_record::{DayDocument, DayPatch, DayRecord};
pub use day_status::DayStatus;
pub use profile::UserProfile;
pub use year_month::YearMonth;
