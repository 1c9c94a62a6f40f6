//! Metric collectors for loadwatch components

pub mod analysis;
pub mod ingest;

pub use analysis::AnalysisMetrics;
pub use ingest::IngestMetrics;

use prometheus::Registry;

/// All loadwatch metrics combined
///
/// Cloning is cheap: every metric is a shared handle.
#[derive(Clone)]
pub struct LoadwatchMetrics {
    /// Admission-side metrics
    pub ingest: IngestMetrics,
    /// Worker-side metrics
    pub analysis: AnalysisMetrics,
}

impl LoadwatchMetrics {
    /// Create all loadwatch metrics and register them
    pub fn new(registry: &Registry) -> crate::error::Result<Self> {
        Ok(Self {
            ingest: IngestMetrics::new(registry)?,
            analysis: AnalysisMetrics::new(registry)?,
        })
    }
}
