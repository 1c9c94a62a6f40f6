//! Error types for loadwatch-observability

use thiserror::Error;

/// Errors that can occur in observability operations
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Metrics-related error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Tracing-related error
    #[error("Tracing error: {0}")]
    Tracing(String),

    /// Exposition output was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Result type alias for observability operations
pub type Result<T> = std::result::Result<T, ObservabilityError>;
