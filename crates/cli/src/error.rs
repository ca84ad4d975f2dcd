//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Request file not found
    #[error("Request file not found: {path}")]
    RequestsNotFound { path: String },

    /// Request file parsing error
    #[error("Failed to parse request file: {message}")]
    RequestsParse { message: String },

    /// Request validation error
    #[error("Request validation failed: {message}")]
    RequestsValidation { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn requests_not_found(path: impl Into<String>) -> Self {
        Self::RequestsNotFound { path: path.into() }
    }

    pub fn requests_parse(message: impl Into<String>) -> Self {
        Self::RequestsParse {
            message: message.into(),
        }
    }

    pub fn requests_validation(message: impl Into<String>) -> Self {
        Self::RequestsValidation {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
