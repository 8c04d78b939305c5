//! Error types for configuration composition and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field the base configuration must provide is absent.
    #[error("base configuration is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid match pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    // Project file loading errors
    #[error("config not found in {0}")]
    NotFound(PathBuf),

    #[error("profile `{0}` is not defined")]
    ProfileNotFound(String),

    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ConfigError::MissingField { field }
    }
}
