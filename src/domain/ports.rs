use crate::domain::model::DayStatus;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Where day classifications come from: the isdayoff.ru vendor or the
/// offline weekday+holiday fallback.
#[async_trait]
pub trait DayStatusSource: Send + Sync {
    async fn day_status(&self, date: NaiveDate) -> Result<DayStatus>;

    /// Short label for the startup log.
    fn describe(&self) -> &'static str;
}
