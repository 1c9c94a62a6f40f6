//! Metrics collection and export for loadwatch
//!
//! Provides Prometheus-compatible metrics for the ingestion and analysis pipeline.

pub mod collectors;
pub mod exporter;
pub mod registry;

pub use collectors::{AnalysisMetrics, IngestMetrics, LoadwatchMetrics};
pub use exporter::export_metrics;
pub use registry::MetricsRegistry;

#[cfg(feature = "http")]
pub use exporter::http::{metrics_handler, metrics_router, MetricsState};
