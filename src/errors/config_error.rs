//! Configuration errors.

use super::error_code::{self, ErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}

impl From<ConfigError> for super::MiningError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationFailed { field, message } => {
                Self::InvalidConfig { field, message }
            }
            ConfigError::FileNotFound { path } => Self::InvalidConfig {
                field: path,
                message: "file not found".to_string(),
            },
            ConfigError::ParseError { path, message } => Self::InvalidConfig {
                field: path,
                message,
            },
        }
    }
}
