use crate::domain::model::WorklogEntry;
use crate::utils::error::{Result, WorklogError};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Timestamp format Jira Server expects in worklog bodies,
/// e.g. `2025-07-07T12:30:00.000+0300`.
const JIRA_STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Basic-auth REST client for a Jira Server instance.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    login: String,
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct WorklogPage {
    pub worklogs: Vec<RemoteWorklog>,
}

#[derive(Debug, Deserialize)]
pub struct RemoteWorklog {
    pub author: WorklogAuthor,
    pub started: String,
    #[serde(rename = "timeSpentSeconds")]
    pub time_spent_seconds: i64,
}

impl RemoteWorklog {
    /// The `started` field is a full timestamp; its first ten characters
    /// are the ISO date.
    pub fn started_date(&self) -> Option<&str> {
        self.started.get(..10)
    }
}

#[derive(Debug, Deserialize)]
pub struct WorklogAuthor {
    pub name: String,
}

#[derive(Debug, Serialize)]
struct NewWorklog<'a> {
    #[serde(rename = "timeSpent")]
    time_spent: &'a str,
    started: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

impl JiraClient {
    pub fn new(
        base_url: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            login: login.into(),
            password: password.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cheap round-trip that fails fast on wrong credentials, before any
    /// calendar work is spent.
    pub async fn verify_credentials(&self) -> Result<()> {
        tracing::info!("Authenticating to Jira: {}", self.base_url);

        let response = self
            .client
            .get(self.url("/rest/api/2/myself"))
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WorklogError::AuthError {
                message: format!("Jira answered {} for user '{}'", status, self.login),
            });
        }
        if !status.is_success() {
            return Err(WorklogError::JiraApiError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        tracing::info!("Authentication successful");
        Ok(())
    }

    /// Asks the timesheet plugin report which issues the user logged time
    /// on inside the range, and pulls issue keys out of the returned HTML.
    pub async fn timesheet_issue_keys(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        target_user: &str,
    ) -> Result<Vec<String>> {
        let start_date = first.format("%Y-%m-%d").to_string();
        let end_date = last.format("%Y-%m-%d").to_string();
        let params: [(&str, &str); 9] = [
            ("reportKey", "jira-timesheet-plugin:report"),
            ("reportingDay", "0"),
            ("startDate", start_date.as_str()),
            ("endDate", end_date.as_str()),
            ("sum", "day"),
            ("moreFields", "assignee"),
            ("sortBy", ""),
            ("sortDir", "ASC"),
            ("targetUser", target_user),
        ];

        let response = self
            .client
            .get(self.url("/secure/TimesheetReport.jspa"))
            .header("Accept", "application/json")
            .query(&params)
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorklogError::JiraApiError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(extract_issue_keys(&response.text().await?))
    }

    pub async fn issue_worklogs(&self, issue_key: &str) -> Result<Vec<RemoteWorklog>> {
        let response = self
            .client
            .get(self.url(&format!("/rest/api/2/issue/{}/worklog", issue_key)))
            .basic_auth(&self.login, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorklogError::JiraApiError {
                status: status.as_u16(),
                message: format!(
                    "fetching worklogs of {}: {}",
                    issue_key,
                    response.text().await.unwrap_or_default()
                ),
            });
        }

        let page: WorklogPage = response.json().await?;
        Ok(page.worklogs)
    }

    pub async fn add_worklog(&self, entry: &WorklogEntry) -> Result<()> {
        let body = NewWorklog {
            time_spent: &entry.time_spent,
            started: entry.started.format(JIRA_STARTED_FORMAT).to_string(),
            comment: entry.comment.as_deref(),
        };

        tracing::debug!(
            "POST worklog {} {} on {}",
            entry.issue,
            entry.time_spent,
            body.started
        );

        let response = self
            .client
            .post(self.url(&format!("/rest/api/2/issue/{}/worklog", entry.issue)))
            .basic_auth(&self.login, Some(&self.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorklogError::JiraApiError {
                status: status.as_u16(),
                message: format!(
                    "pushing worklog to {}: {}",
                    entry.issue,
                    response.text().await.unwrap_or_default()
                ),
            });
        }

        Ok(())
    }
}

/// Pulls issue keys out of the timesheet report HTML. The report links
/// every issue it lists, so anchor text shaped like an issue key is what
/// we are after. Order is preserved, duplicates dropped.
fn extract_issue_keys(html: &str) -> Vec<String> {
    let re = Regex::new(r">\s*([A-Za-z]{1,10}-[0-9]{1,10})\s*</a>").unwrap();

    let mut keys: Vec<String> = Vec::new();
    for captures in re.captures_iter(html) {
        let key = captures[1].to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> JiraClient {
        JiraClient::new(server.base_url(), "jdoe", "secret")
    }

    #[test]
    fn test_extract_issue_keys_from_report_rows() {
        let html = r#"
            <table>
              <tr><td>1</td><td>Bug</td><td><a href="/browse/ABC-1">ABC-1</a></td></tr>
              <tr><td>2</td><td>Task</td><td><a href="/browse/XY-22"> XY-22 </a></td></tr>
              <tr><td>3</td><td>Task</td><td><a href="/browse/ABC-1">ABC-1</a></td></tr>
            </table>"#;

        assert_eq!(extract_issue_keys(html), vec!["ABC-1", "XY-22"]);
    }

    #[test]
    fn test_extract_issue_keys_ignores_other_anchors() {
        let html = r#"<a href="/logout">Log out</a><a href="/browse/ABC-1">summary text</a>"#;
        assert!(extract_issue_keys(html).is_empty());
    }

    #[tokio::test]
    async fn test_verify_credentials_ok() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/myself");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"name": "jdoe"}));
        });

        client_for(&server).verify_credentials().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_verify_credentials_bad_password() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/myself");
            then.status(401);
        });

        let err = client_for(&server).verify_credentials().await.unwrap_err();
        assert!(matches!(err, WorklogError::AuthError { .. }));
    }

    #[tokio::test]
    async fn test_issue_worklogs_decoding() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/issue/ABC-1/worklog");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "worklogs": [{
                        "author": {"name": "jdoe"},
                        "started": "2025-07-07T10:00:00.000+0300",
                        "timeSpentSeconds": 3600
                    }]
                }));
        });

        let worklogs = client_for(&server).issue_worklogs("ABC-1").await.unwrap();

        assert_eq!(worklogs.len(), 1);
        assert_eq!(worklogs[0].author.name, "jdoe");
        assert_eq!(worklogs[0].time_spent_seconds, 3600);
        assert_eq!(worklogs[0].started_date(), Some("2025-07-07"));
    }

    #[tokio::test]
    async fn test_issue_worklogs_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rest/api/2/issue/ABC-1/worklog");
            then.status(404).body("Issue Does Not Exist");
        });

        let err = client_for(&server).issue_worklogs("ABC-1").await.unwrap_err();
        assert!(matches!(err, WorklogError::JiraApiError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_add_worklog_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/api/2/issue/ABC-1/worklog")
                .json_body(serde_json::json!({
                    "timeSpent": "7h 30m",
                    "started": "2025-07-07T12:30:00.000+0300",
                    "comment": "development"
                }));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "1"}));
        });

        let started = DateTime::parse_from_rfc3339("2025-07-07T12:30:00+03:00").unwrap();
        let entry = WorklogEntry::new(
            "ABC-1".to_string(),
            Some("development".to_string()),
            started,
            27_000,
        );

        client_for(&server).add_worklog(&entry).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_add_worklog_omits_missing_comment() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rest/api/2/issue/ABC-1/worklog")
                .json_body(serde_json::json!({
                    "timeSpent": "8h",
                    "started": "2025-07-07T12:30:00.000+0300"
                }));
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "2"}));
        });

        let started = DateTime::parse_from_rfc3339("2025-07-07T12:30:00+03:00").unwrap();
        let entry = WorklogEntry::new("ABC-1".to_string(), None, started, 28_800);

        client_for(&server).add_worklog(&entry).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_timesheet_issue_keys_roundtrip() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/secure/TimesheetReport.jspa")
                .query_param("reportKey", "jira-timesheet-plugin:report")
                .query_param("startDate", "2025-07-01")
                .query_param("endDate", "2025-07-31")
                .query_param("targetUser", "jdoe");
            then.status(200)
                .body(r#"<tr><td>x</td><td>y</td><td><a href="/browse/ABC-7">ABC-7</a></td></tr>"#);
        });

        let first = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let keys = client_for(&server)
            .timesheet_issue_keys(first, last, "jdoe")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(keys, vec!["ABC-7"]);
    }
}
