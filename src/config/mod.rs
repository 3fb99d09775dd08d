pub mod file;

use crate::core::calendar::msk;
use crate::utils::duration::duration_secs;
use crate::utils::error::{Result, WorklogError};
use crate::utils::validation::{
    validate_issue_key, validate_login, validate_range, validate_url, Validate,
};
use chrono::{Datelike, Utc};
#[cfg(feature = "cli")]
use clap::Parser;
use self::file::FileConfig;
use std::collections::BTreeMap;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "jira-worklog")]
#[command(about = "Fills your Jira worklog for a month range")]
pub struct CliArgs {
    #[arg(short, long, default_value = "config.toml", help = "Path to the TOML config file")]
    pub config: String,

    #[arg(short = 'j', long, help = "Jira base URL, e.g. https://jira.example.com")]
    pub jira_url: Option<String>,

    #[arg(short, long, help = "Jira login")]
    pub login: Option<String>,

    #[arg(short, long, help = "Target year, defaults to the current one")]
    pub year: Option<i32>,

    #[arg(short, long, help = "Target month, defaults to the current one")]
    pub month: Option<u32>,

    #[arg(long, help = "First day of the range, defaults to 1")]
    pub first_day: Option<u32>,

    #[arg(long, help = "Last day of the range, defaults to the month's end")]
    pub last_day: Option<u32>,

    #[arg(short = 'H', long, help = "Hours to log per day, defaults to 8")]
    pub hours: Option<i64>,

    #[arg(short = 'M', long, help = "Minutes to log per day on top of hours")]
    pub minutes: Option<i64>,

    #[arg(long, help = "Classify days offline instead of asking isdayoff.ru")]
    pub offline_calendar: bool,

    #[arg(
        short,
        long,
        help = "Issue-to-comment map as JSON, e.g. '{\"ABC-1\": \"development\"}'"
    )]
    pub issues: Option<String>,

    #[arg(long, help = "Skip interactive confirmations")]
    pub yes: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

/// Fully resolved run parameters: CLI flag > config file > default.
#[derive(Debug, Clone)]
pub struct Settings {
    pub jira_url: String,
    pub login: String,
    pub year: i32,
    pub month: u32,
    pub first_day: u32,
    pub last_day: Option<u32>,
    pub hours: i64,
    pub minutes: i64,
    pub offline_calendar: bool,
    pub issues: BTreeMap<String, Option<String>>,
    pub assume_yes: bool,
    pub monitor: bool,
}

impl Settings {
    #[cfg(feature = "cli")]
    pub fn resolve(args: &CliArgs, file: FileConfig) -> Result<Self> {
        let today = Utc::now().with_timezone(&msk());

        let issues = match &args.issues {
            Some(json) => serde_json::from_str::<BTreeMap<String, Option<String>>>(json)
                .map_err(|e| WorklogError::InvalidConfigValueError {
                    field: "issues".to_string(),
                    value: json.clone(),
                    reason: format!("not a valid JSON object: {}", e),
                })?,
            None => file
                .issues
                .unwrap_or_default()
                .into_iter()
                .map(|(key, comment)| (key, normalize_comment(comment)))
                .collect(),
        };

        Ok(Self {
            jira_url: args.jira_url.clone().or(file.jira_url).unwrap_or_default(),
            login: args.login.clone().or(file.login).unwrap_or_default(),
            year: args.year.or(file.year).unwrap_or_else(|| today.year()),
            month: args.month.or(file.month).unwrap_or_else(|| today.month()),
            first_day: args.first_day.or(file.first_day).unwrap_or(1),
            last_day: args.last_day.or(file.last_day),
            hours: args.hours.or(file.hours).unwrap_or(8),
            minutes: args.minutes.or(file.minutes).unwrap_or(0),
            offline_calendar: args.offline_calendar
                || file.offline_calendar.unwrap_or(false),
            issues,
            assume_yes: args.yes,
            monitor: args.monitor,
        })
    }

    pub fn planned_secs(&self) -> i64 {
        duration_secs(self.hours, self.minutes)
    }
}

/// TOML cannot express "no value", so an empty comment string means "log
/// without a comment".
fn normalize_comment(comment: String) -> Option<String> {
    if comment.trim().is_empty() {
        None
    } else {
        Some(comment)
    }
}

impl Validate for Settings {
    /// Checks every field and reports all violations at once, so the user
    /// fixes the input in a single pass.
    fn validate(&self) -> Result<()> {
        let today = Utc::now().with_timezone(&msk());
        let mut errors: Vec<String> = Vec::new();
        let mut check = |result: Result<()>| {
            if let Err(e) = result {
                errors.push(e.to_string());
            }
        };

        check(validate_url("jira_url", &self.jira_url));
        check(validate_login("login", &self.login));
        check(validate_range(
            "year",
            self.year,
            today.year() - 1,
            today.year(),
        ));
        check(validate_range("month", self.month, 1, 12));
        check(validate_range("first_day", self.first_day, 1, 31));
        if let Some(last_day) = self.last_day {
            check(validate_range("last_day", last_day, 1, 31));
        }
        check(validate_range("hours", self.hours, 0, 8));
        check(validate_range("minutes", self.minutes, 0, 59));

        if self.issues.is_empty() {
            errors.push("'issues' must contain at least one issue".to_string());
        }
        for key in self.issues.keys() {
            if let Err(e) = validate_issue_key("issues", key) {
                errors.push(e.to_string());
                break;
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WorklogError::InputError {
                message: errors.join("\n"),
            })
        }
    }
}
