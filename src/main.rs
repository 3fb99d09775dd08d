use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Password};
use jira_worklog::utils::error::{ErrorSeverity, Result as WorklogResult, WorklogError};
use jira_worklog::utils::{logger, validation::Validate};
use jira_worklog::{
    CliArgs, FileConfig, IsDayOffClient, JiraClient, OfflineCalendar, Settings, WorklogEngine,
    DEFAULT_ISDAYOFF_URL,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting jira-worklog");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let file = match FileConfig::load_or_default(&args.config) {
        Ok(file) => file,
        Err(e) => fail(&e),
    };
    let settings = match Settings::resolve(&args, file) {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let password = match resolve_password(&settings) {
        Ok(password) => password,
        Err(e) => fail(&e),
    };

    let jira = JiraClient::new(&settings.jira_url, &settings.login, password);

    let offline = settings.offline_calendar;
    if offline {
        tracing::warn!(
            "Offline day classification in use, double-check the resulting worklog"
        );
    }

    let result = if offline {
        WorklogEngine::new(jira, OfflineCalendar, settings).run().await
    } else {
        WorklogEngine::new(jira, IsDayOffClient::new(DEFAULT_ISDAYOFF_URL), settings)
            .run()
            .await
    };

    match result {
        Ok(summary) if summary.confirmed => {
            tracing::info!("✅ Worklog run completed");
            println!(
                "✅ {} of {} prepared entries pushed",
                summary.pushed, summary.prepared
            );
        }
        Ok(_) => {
            println!("Nothing was pushed");
        }
        Err(e) => {
            tracing::error!(
                "❌ Worklog run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// The password never lives in a config file: it comes from the
/// environment or an interactive hidden prompt.
fn resolve_password(settings: &Settings) -> WorklogResult<String> {
    if let Ok(password) = std::env::var("JIRA_PASSWORD") {
        if !password.is_empty() {
            return Ok(password);
        }
    }

    if settings.assume_yes {
        return Err(WorklogError::MissingConfigError {
            field: "JIRA_PASSWORD (interactive prompting is disabled by --yes)".to_string(),
        });
    }

    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Jira password for {}", settings.login))
        .interact()?)
}

fn fail(e: &WorklogError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}
