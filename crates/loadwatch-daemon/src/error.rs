//! Error types for loadwatch-daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Metrics or tracing setup error
    #[error("Observability error: {0}")]
    Observability(#[from] loadwatch_observability::ObservabilityError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sliding-window store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed a command
    #[error("Command error: {0}")]
    Command(String),

    /// A stored record could not be decoded or encoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

/// Failure while a worker processes one sample
///
/// The sample is dropped; the worker moves on to the next one.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Push, trim or read of the shared window failed
    #[error("window update failed: {0}")]
    Window(#[source] StoreError),

    /// Writing the result cache failed
    #[error("persist failed: {0}")]
    Persist(#[source] StoreError),
}

impl ProcessError {
    /// Short name of the failed store operation, for logs
    pub fn op(&self) -> &'static str {
        match self {
            ProcessError::Window(_) => "update_window",
            ProcessError::Persist(_) => "persist",
        }
    }
}

/// Admission queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The queue is at capacity
    #[error("overloaded")]
    Overloaded,

    /// The queue has been closed for shutdown
    #[error("shutting down")]
    Closed,
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body
    #[error("bad json: {0}")]
    BadRequest(String),

    /// Wrong HTTP method for the route
    #[error("{0}")]
    MethodNotAllowed(&'static str),

    /// Admission queue rejected the sample
    #[error("{0}")]
    Admission(#[from] AdmissionError),

    /// Store read failed
    #[error("store error: {0}")]
    Unavailable(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Admission(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
