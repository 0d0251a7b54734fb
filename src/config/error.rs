//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("File storage requires a data directory")]
    MissingDataDir,

    #[error("Log filter must not be empty")]
    EmptyLogFilter,

    #[error("Narrative key must not be blank")]
    BlankNarrativeKey,
}
