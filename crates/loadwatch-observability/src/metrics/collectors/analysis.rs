//! Analysis metrics

use prometheus::{Gauge, IntCounter, IntGauge, Registry};

/// Metrics updated by the analysis workers
#[derive(Clone)]
pub struct AnalysisMetrics {
    /// Rolling mean of the window at the last computation
    pub rolling_avg: Gauge,

    /// Samples flagged as anomalous
    pub anomalies_total: IntCounter,

    /// 1 if the latest sample was anomalous, else 0
    pub anomaly_flag: IntGauge,
}

impl AnalysisMetrics {
    /// Create and register analysis metrics
    pub fn new(registry: &Registry) -> crate::error::Result<Self> {
        let rolling_avg = Gauge::new("rolling_avg_rps", "Current rolling average of RPS")?;
        registry.register(Box::new(rolling_avg.clone()))?;

        let anomalies_total = IntCounter::new("anomalies_total", "Total detected anomalies")?;
        registry.register(Box::new(anomalies_total.clone()))?;

        let anomaly_flag = IntGauge::new("anomaly_rate", "Anomaly flag as 0/1 for latest sample")?;
        registry.register(Box::new(anomaly_flag.clone()))?;

        Ok(Self {
            rolling_avg,
            anomalies_total,
            anomaly_flag,
        })
    }

    /// Record the outcome of one computation
    pub fn record_analysis(&self, rolling_avg: f64, is_anomaly: bool) {
        self.rolling_avg.set(rolling_avg);
        if is_anomaly {
            self.anomalies_total.inc();
            self.anomaly_flag.set(1);
        } else {
            self.anomaly_flag.set(0);
        }
    }
}
