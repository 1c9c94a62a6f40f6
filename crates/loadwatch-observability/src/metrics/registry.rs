//! Central metrics registry for loadwatch

use prometheus::Registry;
use std::sync::Arc;

/// Central metrics registry for loadwatch
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Registry>,
    metrics: super::collectors::LoadwatchMetrics,
}

impl MetricsRegistry {
    /// Create a registry with unprefixed metric names
    pub fn new() -> crate::error::Result<Self> {
        Self::build(Registry::new())
    }

    fn build(registry: Registry) -> crate::error::Result<Self> {
        let metrics = super::collectors::LoadwatchMetrics::new(&registry)?;
        Ok(Self {
            registry: Arc::new(registry),
            metrics,
        })
    }

    /// Get the loadwatch metric handles
    pub fn metrics(&self) -> &super::collectors::LoadwatchMetrics {
        &self.metrics
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> crate::error::Result<String> {
        super::exporter::export_metrics(&self.registry)
    }

    /// Shared handle to the underlying registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }
}
