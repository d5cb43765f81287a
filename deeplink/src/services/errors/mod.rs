use thiserror::Error;

use crate::{console_debug, console_error, console_warn};

#[derive(Debug, Error)]
pub enum DeepLinkError {
    #[error("Browser environment unavailable: {missing}")]
    EnvironmentUnavailable { missing: String },

    #[error("Navigation error: {url} - {message}")]
    Navigation { url: String, message: String },

    #[error("Configuration error: {field} - {message}")]
    Configuration { field: String, message: String },

    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },
}

pub type DeepLinkResult<T> = Result<T, DeepLinkError>;

impl DeepLinkError {
    pub fn environment(missing: &str) -> Self {
        DeepLinkError::EnvironmentUnavailable {
            missing: missing.to_string(),
        }
    }

    pub fn navigation(url: &str, message: impl Into<String>) -> Self {
        DeepLinkError::Navigation {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Get error severity for logging purposes
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeepLinkError::EnvironmentUnavailable { .. } => ErrorSeverity::Low,
            DeepLinkError::Navigation { .. } => ErrorSeverity::Medium,
            DeepLinkError::Configuration { .. } => ErrorSeverity::High,
            DeepLinkError::InvalidOptions { .. } => ErrorSeverity::High,
        }
    }

    /// Log at the level matching `severity()`
    pub fn log(&self, context: &str) -> ErrorSeverity {
        let severity = self.severity();
        match severity {
            ErrorSeverity::Low => console_debug!("[{}] {}", context, self),
            ErrorSeverity::Medium => console_warn!("[{}] {}", context, self),
            ErrorSeverity::High => console_error!("[{}] {}", context, self),
        }
        severity
    }
}

impl From<serde_json::Error> for DeepLinkError {
    fn from(error: serde_json::Error) -> Self {
        DeepLinkError::InvalidOptions {
            message: error.to_string(),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for DeepLinkError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        DeepLinkError::InvalidOptions {
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}
