use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Triago core
#[derive(Error, Debug)]
pub enum TriagoError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Configuration validation failed: {errors:?}")]
    ConfigValidation { errors: Vec<ValidationError> },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Invalid configuration value
    #[error("Invalid configuration value at {path}: {message}")]
    InvalidConfigValue { path: String, message: String },

    /// Malformed repository identifier
    #[error("Invalid repository '{raw}', expected owner/name")]
    InvalidRepository { raw: String },

    /// Spam pattern that does not compile as a regular expression
    #[error("Invalid spam pattern '{pattern}': {message}")]
    InvalidSpamPattern { pattern: String, message: String },

    /// Governance actions were requested without a prepared plan.
    /// This is a programming error in the caller, not recoverable input.
    #[error("no action plan prepared: build an ActionPlan before applying governance actions")]
    MissingActionPlan,

    /// Gateway (issue tracker) failures, propagated to the caller
    #[error("Gateway error: {context}: {source}")]
    Gateway {
        source: anyhow::Error,
        context: String,
    },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Path to the configuration key that failed validation
    pub path: String,
    /// Error message describing the validation failure
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for Triago operations
pub type Result<T> = std::result::Result<T, TriagoError>;
