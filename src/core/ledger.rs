use crate::core::jira::JiraClient;
use crate::domain::model::{Day, LoggedDay};
use crate::utils::duration::format_duration;
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};

/// Sums the time the user already logged on each date of the range.
///
/// The timesheet report tells us which issues to look at; each issue's
/// worklog is then filtered down to entries authored by the user inside
/// the range. A failing report request only degrades the run: the plan
/// proceeds as if nothing were logged yet.
pub async fn logged_time_per_day(
    jira: &JiraClient,
    days: &[Day],
) -> Result<HashMap<String, LoggedDay>> {
    let mut per_day: HashMap<String, LoggedDay> = HashMap::new();

    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Ok(per_day);
    };

    let issue_keys = match jira
        .timesheet_issue_keys(
            first.started.date_naive(),
            last.started.date_naive(),
            jira.login(),
        )
        .await
    {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!(
                "Could not fetch the timesheet report, planning as if nothing were logged: {}",
                e
            );
            return Ok(per_day);
        }
    };

    let range_dates: HashSet<String> = days.iter().map(|d| d.iso_date()).collect();

    for key in issue_keys {
        for worklog in jira.issue_worklogs(&key).await? {
            let Some(date) = worklog.started_date() else {
                continue;
            };
            if !worklog.author.name.eq_ignore_ascii_case(jira.login())
                || !range_dates.contains(date)
            {
                continue;
            }

            let logged = per_day.entry(date.to_string()).or_default();
            logged.total_secs += worklog.time_spent_seconds;
            logged
                .entries
                .push(format!("{}-{}", key, format_duration(worklog.time_spent_seconds)));
        }
    }

    Ok(per_day)
}
