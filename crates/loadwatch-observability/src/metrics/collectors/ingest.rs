//! Ingestion metrics

use prometheus::{Histogram, HistogramOpts, HistogramTimer, IntCounter, Registry};

/// Metrics for the ingest endpoint
#[derive(Clone)]
pub struct IngestMetrics {
    /// Samples accepted into the admission queue
    pub requests_total: IntCounter,

    /// Wall-clock latency of ingest requests
    pub latency_seconds: Histogram,
}

impl IngestMetrics {
    /// Create and register ingest metrics
    pub fn new(registry: &Registry) -> crate::error::Result<Self> {
        let requests_total =
            IntCounter::new("ingest_requests_total", "Total number of ingested metrics")?;
        registry.register(Box::new(requests_total.clone()))?;

        let latency_seconds = Histogram::with_opts(
            HistogramOpts::new("ingest_latency_seconds", "Latency of ingest endpoint")
                .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
        )?;
        registry.register(Box::new(latency_seconds.clone()))?;

        Ok(Self {
            requests_total,
            latency_seconds,
        })
    }

    /// Record an accepted sample
    pub fn record_accepted(&self) {
        self.requests_total.inc();
    }

    /// Start timing a request; the latency is observed when the timer drops
    pub fn start_timer(&self) -> HistogramTimer {
        self.latency_seconds.start_timer()
    }
}
