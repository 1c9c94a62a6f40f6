//! Application state for API handlers

use crate::pipeline::{AdmissionQueue, ResultCache};
use loadwatch_observability::MetricsRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Producer side of the admission queue
    pub queue: AdmissionQueue,

    /// Last published analysis
    pub cache: ResultCache,

    /// Metrics registry
    pub metrics: MetricsRegistry,

    /// Maximum accepted request body size
    pub max_body_size: usize,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        queue: AdmissionQueue,
        cache: ResultCache,
        metrics: MetricsRegistry,
        max_body_size: usize,
    ) -> Self {
        Self {
            queue,
            cache,
            metrics,
            max_body_size,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
