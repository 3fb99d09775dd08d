use crate::utils::duration::format_duration;
use crate::utils::error::{Result, WorklogError};
use chrono::{DateTime, FixedOffset};

/// Seconds in a regular working day.
pub const FULL_DAY_SECS: i64 = 28_800;
/// Seconds in a shortened pre-holiday day.
pub const SHORT_DAY_SECS: i64 = 25_200;

/// Classification of a calendar day, as reported by isdayoff.ru
/// (`0` workday, `1` day off, `2` shortened pre-holiday day).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Workday,
    DayOff,
    ShortDay,
}

impl DayStatus {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim() {
            "0" => Ok(DayStatus::Workday),
            "1" => Ok(DayStatus::DayOff),
            "2" => Ok(DayStatus::ShortDay),
            other => Err(WorklogError::CalendarError {
                message: format!("unexpected day status code '{}', expected 0, 1 or 2", other),
            }),
        }
    }

    pub fn from_day_off_flag(day_off: bool) -> Self {
        if day_off {
            DayStatus::DayOff
        } else {
            DayStatus::Workday
        }
    }

    pub fn is_day_off(self) -> bool {
        self == DayStatus::DayOff
    }

    pub fn is_short_day(self) -> bool {
        self == DayStatus::ShortDay
    }

    /// How much time can be logged on such a day at most.
    pub fn capacity_secs(self) -> i64 {
        match self {
            DayStatus::Workday => FULL_DAY_SECS,
            DayStatus::DayOff => 0,
            DayStatus::ShortDay => SHORT_DAY_SECS,
        }
    }
}

/// One working day of the target range. `started` carries the (randomized)
/// wall-clock time that pushed worklog entries will be stamped with.
#[derive(Debug, Clone)]
pub struct Day {
    pub started: DateTime<FixedOffset>,
    pub status: DayStatus,
    pub planned_secs: i64,
}

impl Day {
    pub fn capacity_secs(&self) -> i64 {
        self.status.capacity_secs()
    }

    pub fn iso_date(&self) -> String {
        self.started.format("%Y-%m-%d").to_string()
    }
}

/// A worklog entry ready to be pushed to Jira.
#[derive(Debug, Clone)]
pub struct WorklogEntry {
    pub issue: String,
    pub comment: Option<String>,
    pub started: DateTime<FixedOffset>,
    pub seconds: i64,
    pub time_spent: String,
}

impl WorklogEntry {
    pub fn new(
        issue: String,
        comment: Option<String>,
        started: DateTime<FixedOffset>,
        seconds: i64,
    ) -> Self {
        Self {
            issue,
            comment,
            started,
            seconds,
            time_spent: format_duration(seconds),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seconds == 0
    }
}

/// Time already logged in Jira on one date.
#[derive(Debug, Clone, Default)]
pub struct LoggedDay {
    pub total_secs: i64,
    /// Human-readable `KEY-<duration>` strings for the preview log.
    pub entries: Vec<String>,
}
