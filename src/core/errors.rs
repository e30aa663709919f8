//! Shared error types for the analysis core

use thiserror::Error;

/// Main error type for envymap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: dangling owner references, unknown handles,
    /// kind mismatches on re-insertion
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON errors at the output boundary
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
