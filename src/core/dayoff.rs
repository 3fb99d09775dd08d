use crate::domain::model::DayStatus;
use crate::domain::ports::DayStatusSource;
use crate::utils::error::{Result, WorklogError};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use std::time::Duration;

pub const DEFAULT_ISDAYOFF_URL: &str = "https://isdayoff.ru";

const VENDOR_ATTEMPTS: u32 = 3;
const VENDOR_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Classifies days through the public isdayoff.ru service. The `pre=1`
/// query makes the vendor report shortened pre-holiday days as their own
/// status instead of folding them into workdays.
pub struct IsDayOffClient {
    client: reqwest::Client,
    base_url: String,
    retry_delay: Duration,
}

impl IsDayOffClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_delay: VENDOR_RETRY_DELAY,
        }
    }
}

#[async_trait]
impl DayStatusSource for IsDayOffClient {
    async fn day_status(&self, date: NaiveDate) -> Result<DayStatus> {
        let url = format!("{}/{}", self.base_url, date.format("%Y%m%d"));

        for attempt in 1..=VENDOR_ATTEMPTS {
            match self.client.get(&url).query(&[("pre", "1")]).send().await {
                Ok(response) if response.status().is_success() => {
                    let body = response.text().await?;
                    return DayStatus::from_code(&body);
                }
                Ok(response) => {
                    tracing::warn!(
                        "Vendor returned {} for {} (attempt {}/{})",
                        response.status(),
                        url,
                        attempt,
                        VENDOR_ATTEMPTS
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Vendor request for {} failed: {} (attempt {}/{})",
                        url,
                        e,
                        attempt,
                        VENDOR_ATTEMPTS
                    );
                }
            }

            if attempt < VENDOR_ATTEMPTS {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(WorklogError::CalendarError {
            message: format!(
                "could not classify {} after {} attempts",
                date.format("%d.%m.%Y"),
                VENDOR_ATTEMPTS
            ),
        })
    }

    fn describe(&self) -> &'static str {
        "isdayoff.ru"
    }
}

/// Offline fallback: weekends plus the fixed Russian public holidays.
/// Knows nothing about moved holidays or shortened days, so runs using it
/// should be double-checked against the real production calendar.
pub struct OfflineCalendar;

impl OfflineCalendar {
    fn is_public_holiday(date: NaiveDate) -> bool {
        matches!(
            (date.month(), date.day()),
            (1, 1..=8) | (2, 23) | (3, 8) | (5, 1) | (5, 9) | (6, 12) | (11, 4)
        )
    }
}

#[async_trait]
impl DayStatusSource for OfflineCalendar {
    async fn day_status(&self, date: NaiveDate) -> Result<DayStatus> {
        let day_off = matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            || Self::is_public_holiday(date);
        Ok(DayStatus::from_day_off_flag(day_off))
    }

    fn describe(&self) -> &'static str {
        "the offline weekday calendar"
    }
}
