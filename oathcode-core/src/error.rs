//! Error types for the oathcode CLI tool
//!
//! This module defines all error types used throughout the application,
//! providing consistent error handling and user-friendly error messages.

use thiserror::Error;

/// Main error type for the oathcode application
#[derive(Error, Debug)]
pub enum OathcodeError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to code calculation
    #[error("Code error: {0}")]
    Code(#[from] CodeError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON output errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save configuration file: {path}")]
    SaveFailed { path: String },

    #[error("No credential named {name} in configuration")]
    NotFound { name: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// Code calculation errors
///
/// None of these are retried internally. `UpstreamUnavailable` is passed
/// through unchanged from the HMAC engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("This is not a Steam credential")]
    NotSteamCredential,

    #[error("HMAC engine unavailable: {reason}")]
    UpstreamUnavailable { reason: String },

    #[error("Invalid Base32 secret")]
    InvalidBase32,
}

impl CodeError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OathcodeError>;
