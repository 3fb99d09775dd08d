use crate::utils::error::{Result, WorklogError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional TOML config file. Every field can be overridden on the
/// command line; `[issues]` maps issue keys to worklog comments (use an
/// empty string for no comment).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub jira_url: Option<String>,
    pub login: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub first_day: Option<u32>,
    pub last_day: Option<u32>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub offline_calendar: Option<bool>,
    pub issues: Option<BTreeMap<String, String>>,
}

impl FileConfig {
    /// Missing files are not an error: the tool can run on CLI flags
    /// alone.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            tracing::warn!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WorklogError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| WorklogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values;
    /// unknown variables are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
