//! loadwatch Observability
//!
//! Provides metrics and tracing infrastructure for the loadwatch daemon.
//!
//! ## Features
//!
//! - **Metrics**: Prometheus-compatible counters, gauges and histograms for
//!   ingestion and analysis, exposed in the text exposition format
//! - **Tracing**: `tracing-subscriber` initialisation with env-filter and
//!   optional JSON output

pub mod error;
pub mod metrics;
pub mod tracing;

pub use error::ObservabilityError;
pub use metrics::{AnalysisMetrics, IngestMetrics, LoadwatchMetrics, MetricsRegistry};
pub use tracing::{init_tracing, TracingConfig};
