use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected status {status}: {}", describe_service_error(.code, .message, .body))]
    UnexpectedStatus {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
        body: String,
    },

    #[error("Type mismatch: expected {expected}, service returned {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

fn describe_service_error(code: &Option<String>, message: &Option<String>, body: &str) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{}: {}", code, message),
        (Some(code), None) => code.clone(),
        (None, Some(message)) => message.clone(),
        (None, None) if body.is_empty() => "empty response body".to_string(),
        (None, None) => body.chars().take(256).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed CLI command; never zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl GraphError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// HTTP status associated with the failure, if the service answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Network,
            Self::UnexpectedStatus { .. } => ErrorCategory::Service,
            Self::Serialization(_) | Self::TypeMismatch { .. } => ErrorCategory::Data,
            Self::Io(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnexpectedStatus { status, .. } if status.is_server_error() => {
                ErrorSeverity::Medium
            }
            Self::UnexpectedStatus { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                ErrorSeverity::Medium
            }
            Self::Transport(_) => ErrorSeverity::Medium,
            Self::UnexpectedStatus { .. }
            | Self::TypeMismatch { .. }
            | Self::ValidationError { .. } => ErrorSeverity::High,
            Self::Serialization(_)
            | Self::Io(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the configured endpoint",
            ErrorCategory::Service => match self.status() {
                Some(StatusCode::UNAUTHORIZED) => "The access token is missing or expired",
                Some(StatusCode::FORBIDDEN) => "The token lacks the permissions for this resource",
                Some(StatusCode::NOT_FOUND) => "Verify the resource ID and tenant",
                Some(s) if s.is_server_error() => "The service is unavailable, try again later",
                _ => "Inspect the service error message for details",
            },
            ErrorCategory::Data => "The service returned a payload of an unexpected shape",
            ErrorCategory::Configuration => "Check the configuration file and environment",
            ErrorCategory::Input => "Check the request arguments",
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
