pub mod calendar;
pub mod dayoff;
pub mod engine;
pub mod jira;
pub mod ledger;
pub mod planner;

pub use crate::domain::model::{Day, DayStatus, LoggedDay, WorklogEntry};
pub use crate::domain::ports::DayStatusSource;
pub use crate::utils::error::Result;
