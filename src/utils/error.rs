use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorklogError {
    #[error("Jira request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input validation failed:\n{message}")]
    InputError { message: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Day-off calendar failure: {message}")]
    CalendarError { message: String },

    #[error("Jira returned HTTP {status}: {message}")]
    JiraApiError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    Auth,
    Calendar,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WorklogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WorklogError::ApiError(_) | WorklogError::JiraApiError { .. } => ErrorCategory::Network,
            WorklogError::ConfigValidationError { .. }
            | WorklogError::InvalidConfigValueError { .. }
            | WorklogError::MissingConfigError { .. } => ErrorCategory::Configuration,
            WorklogError::InputError { .. } => ErrorCategory::Validation,
            WorklogError::AuthError { .. } => ErrorCategory::Auth,
            WorklogError::CalendarError { .. } => ErrorCategory::Calendar,
            WorklogError::IoError(_)
            | WorklogError::SerializationError(_)
            | WorklogError::PromptError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Calendar => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Validation | ErrorCategory::Auth => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WorklogError::ApiError(e) => format!("Could not reach the server: {}", e),
            WorklogError::AuthError { .. } => {
                "Jira rejected the credentials. Check your login and password.".to_string()
            }
            WorklogError::CalendarError { message } => {
                format!("The day-off calendar could not be resolved: {}", message)
            }
            WorklogError::InputError { message } => format!("Some inputs are invalid:\n{}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check your network connection and the Jira URL, then retry.".to_string()
            }
            ErrorCategory::Configuration | ErrorCategory::Validation => {
                "Fix the reported fields in the config file or on the command line.".to_string()
            }
            ErrorCategory::Auth => {
                "Re-enter the password with a latin keyboard layout and verify the login."
                    .to_string()
            }
            ErrorCategory::Calendar => {
                "The vendor may be down; retry later or pass --offline-calendar.".to_string()
            }
            ErrorCategory::Io => "Inspect the underlying IO error and retry.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorklogError>;
