pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::{file::FileConfig, Settings};
pub use core::dayoff::{IsDayOffClient, OfflineCalendar, DEFAULT_ISDAYOFF_URL};
pub use core::engine::{RunSummary, WorklogEngine};
pub use core::jira::JiraClient;
pub use utils::error::{Result, WorklogError};
