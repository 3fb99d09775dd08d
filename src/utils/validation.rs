use crate::utils::error::{Result, WorklogError};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(WorklogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(()),
            "http" | "https" => Err(WorklogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: "URL has no host".to_string(),
            }),
            scheme => Err(WorklogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(WorklogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Jira Server logins are short latin strings; anything else is almost
/// always a typo or a wrong keyboard layout.
pub fn validate_login(field_name: &str, login: &str) -> Result<()> {
    let re = Regex::new(r"^[a-zA-Z]{2,24}$").unwrap();
    if re.is_match(login) {
        Ok(())
    } else {
        Err(WorklogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: login.to_string(),
            reason: "login must be 2-24 latin letters".to_string(),
        })
    }
}

pub fn validate_issue_key(field_name: &str, key: &str) -> Result<()> {
    let re = Regex::new(r"^[a-zA-Z]{1,10}-[0-9]{1,10}$").unwrap();
    if re.is_match(key) {
        Ok(())
    } else {
        Err(WorklogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "issue keys look like 'ABC-123'".to_string(),
        })
    }
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(WorklogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
