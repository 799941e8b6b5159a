use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("At least one subject must remain.")]
    LastSubjectError,

    #[error("Unexpected response from {endpoint}: {message}")]
    ResponseError { endpoint: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::LastSubjectError => ErrorSeverity::Low,
            PlannerError::ApiError(_) | PlannerError::ResponseError { .. } => ErrorSeverity::Medium,
            PlannerError::SerializationError(_) => ErrorSeverity::High,
            PlannerError::ConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息（不含內部細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::ApiError(e) if e.is_timeout() => {
                "The planning server did not respond in time.".to_string()
            }
            PlannerError::ApiError(e) if e.is_connect() => {
                "Could not connect to the planning server.".to_string()
            }
            PlannerError::ApiError(_) => "The request to the planning server failed.".to_string(),
            PlannerError::IoError(e) => format!("File access failed: {}", e),
            PlannerError::SerializationError(_) => "The data could not be read as JSON.".to_string(),
            PlannerError::ConfigError { message } => format!("Configuration problem: {}", message),
            PlannerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration value for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::ApiError(_) | PlannerError::ResponseError { .. } => {
                "Check that the planning server is running and try again."
            }
            PlannerError::IoError(_) => "Check the storage path and its permissions.",
            PlannerError::SerializationError(_) => "Check that the input file contains valid JSON.",
            PlannerError::ConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line arguments."
            }
            PlannerError::LastSubjectError => "Add another subject before deleting this one.",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
