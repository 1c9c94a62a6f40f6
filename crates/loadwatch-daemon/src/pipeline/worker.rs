//! Analysis worker pool

use super::cache::ResultCache;
use super::queue::SampleReceiver;
use super::stats;
use super::window::SlidingWindow;
use crate::error::ProcessError;
use loadwatch_observability::AnalysisMetrics;
use loadwatch_types::{Analysis, Sample};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything a worker needs to process one sample
pub struct WorkerContext {
    pub window: SlidingWindow,
    pub cache: ResultCache,
    pub metrics: AnalysisMetrics,
    pub z_threshold: f64,
}

impl WorkerContext {
    /// Fold `sample` into the window, publish the analysis, update metrics
    ///
    /// Nothing is retried; on error the sample is simply not reflected in
    /// the published analysis or the metrics.
    pub async fn process(&self, sample: Sample) -> Result<Analysis, ProcessError> {
        let window = self
            .window
            .record(sample.rps)
            .await
            .map_err(ProcessError::Window)?;

        let stats = stats::compute(&window, sample.rps, self.z_threshold);
        let analysis = Analysis::from_stats(
            stats,
            &sample,
            self.window.capacity(),
            self.z_threshold,
            chrono::Utc::now().timestamp(),
        );

        self.cache
            .persist(&analysis)
            .await
            .map_err(ProcessError::Persist)?;

        self.metrics.record_analysis(stats.mean, stats.is_anomaly);
        Ok(analysis)
    }
}

/// Per-worker totals, returned when a worker stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub processed: u64,
    pub failed: u64,
}

/// Fixed set of workers draining the admission queue
pub struct WorkerPool {
    handles: Vec<JoinHandle<WorkerReport>>,
}

impl WorkerPool {
    /// Spawn `workers` tasks; they run until the queue is closed and drained
    pub fn spawn(workers: usize, receiver: SampleReceiver, context: Arc<WorkerContext>) -> Self {
        let handles = (0..workers)
            .map(|id| tokio::spawn(run_worker(id, receiver.clone(), context.clone())))
            .collect();

        tracing::info!(workers, "analysis workers started");
        Self { handles }
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to finish and sum their reports
    pub async fn join(self) -> WorkerReport {
        let mut total = WorkerReport::default();
        for handle in self.handles {
            match handle.await {
                Ok(report) => {
                    total.processed += report.processed;
                    total.failed += report.failed;
                }
                Err(e) => tracing::error!(error = %e, "analysis worker panicked"),
            }
        }
        tracing::info!(
            processed = total.processed,
            failed = total.failed,
            "analysis workers stopped"
        );
        total
    }
}

async fn run_worker(id: usize, receiver: SampleReceiver, context: Arc<WorkerContext>) -> WorkerReport {
    let mut report = WorkerReport::default();

    while let Some(sample) = receiver.recv().await {
        match context.process(sample).await {
            Ok(analysis) => {
                report.processed += 1;
                tracing::debug!(
                    worker = id,
                    rps = analysis.last_rps,
                    count = analysis.count,
                    mean = analysis.rolling_avg,
                    z = analysis.z_score,
                    anomaly = analysis.is_anomaly,
                    "sample analyzed"
                );
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!(worker = id, op = e.op(), error = %e, "sample dropped");
            }
        }
    }

    report
}
