use crate::domain::model::Day;
use crate::domain::ports::DayStatusSource;
use crate::utils::error::{Result, WorklogError};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use rand::Rng;

/// Worklogs are stamped in MSK (UTC+3, no DST).
pub fn msk() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // month is validated to 1-12 before we get here
    next_month.unwrap().pred_opt().unwrap().day()
}

/// Resolves the target range inside one month. A missing `last_day` means
/// the month's final day. Days that don't exist in the month (e.g. Feb 30)
/// and inverted ranges are rejected.
pub fn month_range(
    year: i32,
    month: u32,
    first_day: u32,
    last_day: Option<u32>,
) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, first_day).ok_or_else(|| {
        WorklogError::InvalidConfigValueError {
            field: "first_day".to_string(),
            value: first_day.to_string(),
            reason: format!("not a calendar day of {:04}-{:02}", year, month),
        }
    })?;

    let last = match last_day {
        Some(day) => NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            WorklogError::InvalidConfigValueError {
                field: "last_day".to_string(),
                value: day.to_string(),
                reason: format!("not a calendar day of {:04}-{:02}", year, month),
            }
        })?,
        None => NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap(),
    };

    if first > last {
        return Err(WorklogError::InvalidConfigValueError {
            field: "first_day".to_string(),
            value: first.format("%d.%m.%Y").to_string(),
            reason: format!("range starts after it ends ({})", last.format("%d.%m.%Y")),
        });
    }

    Ok((first, last))
}

/// Stamps a date with a random daytime clock time so pushed entries don't
/// all start at midnight.
fn random_started_at(date: NaiveDate) -> DateTime<FixedOffset> {
    let mut rng = rand::thread_rng();
    let hour = rng.gen_range(11..=20);
    let minute = rng.gen_range(0..=59);
    let second = rng.gen_range(0..=59);

    // in-range by construction, and a fixed offset maps every local time
    // to exactly one instant
    msk()
        .from_local_datetime(&date.and_hms_opt(hour, minute, second).unwrap())
        .unwrap()
}

/// Walks the range and keeps every day the user could log time on,
/// classifying each date through the given source.
pub async fn collect_workdays<S: DayStatusSource>(
    source: &S,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<Vec<Day>> {
    tracing::info!("Timezone for worklog timestamps: UTC+03:00 (MSK)");
    tracing::info!(
        "Classifying days from {} to {} via {}",
        first.format("%d.%m.%Y"),
        last.format("%d.%m.%Y"),
        source.describe()
    );

    let mut workdays = Vec::new();
    let mut days_off = Vec::new();
    let mut current = first;

    while current <= last {
        let status = source.day_status(current).await?;

        if status.is_day_off() {
            days_off.push(current);
        } else {
            workdays.push(Day {
                started: random_started_at(current),
                status,
                planned_secs: 0,
            });
        }

        current = current.succ_opt().ok_or_else(|| WorklogError::CalendarError {
            message: format!("date overflow after {}", current),
        })?;
    }

    tracing::info!(
        "Working days: {}",
        workdays
            .iter()
            .map(|d| d.started.format("%a %d.%m").to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let short_days: Vec<String> = workdays
        .iter()
        .filter(|d| d.status.is_short_day())
        .map(|d| d.started.format("%a %d.%m").to_string())
        .collect();
    if !short_days.is_empty() {
        tracing::info!("Shortened pre-holiday days: {}", short_days.join(", "));
    }

    if !days_off.is_empty() {
        tracing::info!(
            "Days off: {}",
            days_off
                .iter()
                .map(|d| d.format("%a %d.%m").to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(workdays)
}
