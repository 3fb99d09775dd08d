use crate::config::Settings;
use crate::core::calendar::{collect_workdays, month_range};
use crate::core::jira::JiraClient;
use crate::core::ledger::logged_time_per_day;
use crate::core::planner::{apply_logged_time, distribute};
use crate::domain::ports::DayStatusSource;
use crate::utils::duration::format_duration;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use dialoguer::{theme::ColorfulTheme, Confirm};

/// What a run ended with. `confirmed` is false when the user looked at the
/// prepared plan and declined to push it.
#[derive(Debug)]
pub struct RunSummary {
    pub prepared: usize,
    pub pushed: usize,
    pub confirmed: bool,
}

/// Drives a full run: range resolution, authentication, day
/// classification, correction for already-logged time, distribution,
/// confirmation and the final push.
pub struct WorklogEngine<S: DayStatusSource> {
    jira: JiraClient,
    day_status: S,
    settings: Settings,
    monitor: SystemMonitor,
}

impl<S: DayStatusSource> WorklogEngine<S> {
    pub fn new(jira: JiraClient, day_status: S, settings: Settings) -> Self {
        let monitor = SystemMonitor::new(settings.monitor);
        Self {
            jira,
            day_status,
            settings,
            monitor,
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let (first, last) = month_range(
            self.settings.year,
            self.settings.month,
            self.settings.first_day,
            self.settings.last_day,
        )?;

        tracing::info!(
            "User {} plans to log {} per day from {} to {}",
            self.settings.login,
            format_duration(self.settings.planned_secs()),
            first.format("%d.%m.%Y"),
            last.format("%d.%m.%Y")
        );
        tracing::info!(
            "Time will be distributed across: {}",
            self.settings
                .issues
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.jira.verify_credentials().await?;
        self.monitor.log_stats("auth");

        let days = collect_workdays(&self.day_status, first, last).await?;
        if days.is_empty() {
            tracing::info!("No working days in the range, nothing to do");
            return Ok(RunSummary {
                prepared: 0,
                pushed: 0,
                confirmed: true,
            });
        }
        self.monitor.log_stats("calendar");

        let logged = logged_time_per_day(&self.jira, &days).await?;
        let outcome = apply_logged_time(days, &logged, self.settings.planned_secs());
        self.monitor.log_stats("planning");

        if !outcome.overtime.is_empty() {
            let report: Vec<String> = outcome
                .overtime
                .iter()
                .map(|(date, secs)| format!("{}: {}", date, format_duration(*secs)))
                .collect();
            tracing::warn!(
                "More than a full day is already logged on: {}",
                report.join(", ")
            );

            if !self.settings.assume_yes && !self.confirm("Check those dates by hand later. Continue anyway?")? {
                tracing::info!("Stopping so the worklog can be reviewed");
                return Ok(RunSummary {
                    prepared: 0,
                    pushed: 0,
                    confirmed: false,
                });
            }
        }

        let entries = distribute(&self.settings.issues, &outcome.days);
        let prepared = entries.iter().filter(|e| !e.is_empty()).count();

        if prepared == 0 {
            tracing::info!("Every day is already filled, nothing left to log");
            return Ok(RunSummary {
                prepared: 0,
                pushed: 0,
                confirmed: true,
            });
        }

        if !self.settings.assume_yes && !self.confirm("Push the prepared worklog to Jira?")? {
            tracing::info!("Okay, nothing was pushed");
            return Ok(RunSummary {
                prepared,
                pushed: 0,
                confirmed: false,
            });
        }

        tracing::info!("Pushing {} worklog entries", prepared);
        let mut pushed = 0;
        for entry in entries.iter().filter(|e| !e.is_empty()) {
            self.jira.add_worklog(entry).await?;
            pushed += 1;
        }

        self.monitor.log_final_stats();
        tracing::info!("All done, have a nice day!");

        Ok(RunSummary {
            prepared,
            pushed,
            confirmed: true,
        })
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}
