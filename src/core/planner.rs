use crate::domain::model::{Day, LoggedDay, WorklogEntry, FULL_DAY_SECS};
use crate::utils::duration::format_duration;
use std::collections::{BTreeMap, HashMap};

/// Days with their plannable time filled in, plus the dates where more
/// than a full working day is already logged.
pub struct PlanOutcome {
    pub days: Vec<Day>,
    pub overtime: Vec<(String, i64)>,
}

/// Caps the user's requested daily amount at what each day still has room
/// for, given the time already logged in Jira.
pub fn apply_logged_time(
    mut days: Vec<Day>,
    logged: &HashMap<String, LoggedDay>,
    requested_secs: i64,
) -> PlanOutcome {
    tracing::info!("Adjusting the plan for time already logged in Jira");

    let mut overtime = Vec::new();

    for day in &mut days {
        let date = day.iso_date();
        let logged_day = logged.get(&date);
        let logged_secs = logged_day.map(|l| l.total_secs).unwrap_or(0);

        if logged_secs > FULL_DAY_SECS {
            overtime.push((date.clone(), logged_secs));
        }

        let capacity = day.capacity_secs();
        day.planned_secs = if logged_secs >= capacity {
            0
        } else {
            requested_secs.min(capacity - logged_secs)
        };

        match logged_day.filter(|l| !l.entries.is_empty()) {
            Some(l) => tracing::info!(
                "{}: available - {}, already logged - {}",
                day.started.format("%d.%m"),
                format_duration(day.planned_secs),
                l.entries.join(", ")
            ),
            None => tracing::info!(
                "{}: available - {}, worklog is empty",
                day.started.format("%d.%m"),
                format_duration(day.planned_secs)
            ),
        }
    }

    PlanOutcome { days, overtime }
}

/// Splits each day's plannable time across the issues: every issue gets a
/// whole number of hours, the last one also takes the remainder. Days with
/// nothing to log produce no entries.
pub fn distribute(
    issues: &BTreeMap<String, Option<String>>,
    days: &[Day],
) -> Vec<WorklogEntry> {
    tracing::info!("Preparing the worklog before pushing to Jira");

    let issue_count = issues.len() as i64;
    if issue_count == 0 {
        return Vec::new();
    }

    let mut entries = Vec::new();

    for day in days {
        let per_issue = day.planned_secs / 3600 / issue_count * 3600;
        let last_share = day.planned_secs - per_issue * (issue_count - 1);

        if per_issue == 0 && last_share == 0 {
            continue;
        }

        let mut preview = Vec::new();
        for (index, (issue, comment)) in issues.iter().enumerate() {
            let seconds = if index as i64 == issue_count - 1 {
                last_share
            } else {
                per_issue
            };

            let entry = WorklogEntry::new(issue.clone(), comment.clone(), day.started, seconds);
            preview.push(match &entry.comment {
                Some(c) => format!("{} {}-{}", entry.issue, c, entry.time_spent),
                None => format!("{}-{}", entry.issue, entry.time_spent),
            });
            entries.push(entry);
        }

        tracing::info!(
            "Worklog for {}: {}",
            day.started.format("%d.%m"),
            preview.join(", ")
        );
    }

    tracing::info!("Worklog prepared");

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::msk;
    use crate::domain::model::DayStatus;
    use chrono::TimeZone;

    fn day(date: (i32, u32, u32), status: DayStatus) -> Day {
        let (y, m, d) = date;
        Day {
            started: msk().with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            status,
            planned_secs: 0,
        }
    }

    fn planned_day(date: (i32, u32, u32), planned_secs: i64) -> Day {
        let mut day = day(date, DayStatus::Workday);
        day.planned_secs = planned_secs;
        day
    }

    fn logged(total_secs: i64) -> LoggedDay {
        LoggedDay {
            total_secs,
            entries: vec![format!("ABC-1-{}", format_duration(total_secs))],
        }
    }

    #[test]
    fn test_untouched_day_gets_full_request() {
        let days = vec![day((2025, 7, 7), DayStatus::Workday)];
        let outcome = apply_logged_time(days, &HashMap::new(), 28_800);

        assert_eq!(outcome.days[0].planned_secs, 28_800);
        assert!(outcome.overtime.is_empty());
    }

    #[test]
    fn test_partially_logged_day_gets_the_rest() {
        let days = vec![day((2025, 7, 7), DayStatus::Workday)];
        let mut existing = HashMap::new();
        existing.insert("2025-07-07".to_string(), logged(3600));

        let outcome = apply_logged_time(days, &existing, 28_800);

        assert_eq!(outcome.days[0].planned_secs, 25_200);
    }

    #[test]
    fn test_requested_amount_wins_when_room_remains() {
        let days = vec![day((2025, 7, 7), DayStatus::Workday)];
        let mut existing = HashMap::new();
        existing.insert("2025-07-07".to_string(), logged(3600));

        // 4h requested, 7h free - the request stands
        let outcome = apply_logged_time(days, &existing, 14_400);

        assert_eq!(outcome.days[0].planned_secs, 14_400);
    }

    #[test]
    fn test_full_day_leaves_nothing_to_plan() {
        let days = vec![day((2025, 7, 7), DayStatus::Workday)];
        let mut existing = HashMap::new();
        existing.insert("2025-07-07".to_string(), logged(28_800));

        let outcome = apply_logged_time(days, &existing, 28_800);

        assert_eq!(outcome.days[0].planned_secs, 0);
        assert!(outcome.overtime.is_empty());
    }

    #[test]
    fn test_overtime_day_is_flagged() {
        let days = vec![day((2025, 7, 7), DayStatus::Workday)];
        let mut existing = HashMap::new();
        existing.insert("2025-07-07".to_string(), logged(36_000));

        let outcome = apply_logged_time(days, &existing, 28_800);

        assert_eq!(outcome.days[0].planned_secs, 0);
        assert_eq!(outcome.overtime, vec![("2025-07-07".to_string(), 36_000)]);
    }

    #[test]
    fn test_short_day_capacity_applies() {
        let days = vec![day((2025, 6, 11), DayStatus::ShortDay)];
        let outcome = apply_logged_time(days, &HashMap::new(), 28_800);

        assert_eq!(outcome.days[0].planned_secs, 25_200);
    }

    #[test]
    fn test_distribute_even_split() {
        let mut issues = BTreeMap::new();
        issues.insert("ABC-1".to_string(), Some("dev".to_string()));
        issues.insert("ABC-2".to_string(), None);

        let entries = distribute(&issues, &[planned_day((2025, 7, 7), 28_800)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].issue, "ABC-1");
        assert_eq!(entries[0].seconds, 14_400);
        assert_eq!(entries[0].time_spent, "4h");
        assert_eq!(entries[1].issue, "ABC-2");
        assert_eq!(entries[1].seconds, 14_400);
    }

    #[test]
    fn test_distribute_remainder_goes_to_last_issue() {
        let mut issues = BTreeMap::new();
        issues.insert("ABC-1".to_string(), None);
        issues.insert("ABC-2".to_string(), None);
        issues.insert("ABC-3".to_string(), None);

        // 8h across three issues: 2h + 2h + 4h
        let entries = distribute(&issues, &[planned_day((2025, 7, 7), 28_800)]);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].seconds, 7200);
        assert_eq!(entries[1].seconds, 7200);
        assert_eq!(entries[2].seconds, 14_400);
    }

    #[test]
    fn test_distribute_sub_hour_amount_lands_on_last_issue() {
        let mut issues = BTreeMap::new();
        issues.insert("ABC-1".to_string(), None);
        issues.insert("ABC-2".to_string(), None);

        // 1h 30m: no whole hour per issue, everything goes to the last one
        let entries = distribute(&issues, &[planned_day((2025, 7, 7), 5400)]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].seconds, 0);
        assert!(entries[0].is_empty());
        assert_eq!(entries[1].seconds, 5400);
        assert_eq!(entries[1].time_spent, "1h 30m");
    }

    #[test]
    fn test_distribute_skips_exhausted_days() {
        let mut issues = BTreeMap::new();
        issues.insert("ABC-1".to_string(), None);

        let entries = distribute(
            &issues,
            &[
                planned_day((2025, 7, 7), 0),
                planned_day((2025, 7, 8), 28_800),
            ],
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].started.format("%d.%m").to_string(), "08.07");
    }

    #[test]
    fn test_distribute_without_issues_is_empty() {
        let entries = distribute(&BTreeMap::new(), &[planned_day((2025, 7, 7), 28_800)]);
        assert!(entries.is_empty());
    }
}
