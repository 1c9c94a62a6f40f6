//! Ingestion-to-analysis pipeline
//!
//! ```text
//! producer -> AdmissionQueue -> worker -> SlidingWindow (push, trim, read)
//!          -> stats::compute -> ResultCache -> readers
//! ```

pub mod cache;
pub mod queue;
pub mod stats;
pub mod window;
pub mod worker;

pub use cache::ResultCache;
pub use queue::{AdmissionQueue, SampleReceiver};
pub use window::SlidingWindow;
pub use worker::{WorkerContext, WorkerPool, WorkerReport};

use crate::config::PipelineConfig;
use crate::store::WindowStore;
use loadwatch_observability::LoadwatchMetrics;
use std::sync::Arc;

/// A running pipeline
///
/// Dropping every clone of `queue` closes it; the workers then drain what
/// was already admitted and `workers.join()` returns.
pub struct Pipeline {
    pub queue: AdmissionQueue,
    pub cache: ResultCache,
    pub workers: WorkerPool,
}

impl Pipeline {
    /// Build the queue, window and cache over `store` and spawn the workers
    pub fn start(
        config: &PipelineConfig,
        store: Arc<dyn WindowStore>,
        metrics: &LoadwatchMetrics,
    ) -> Self {
        let (queue, receiver) = AdmissionQueue::new(config.queue_capacity, metrics.ingest.clone());
        let cache = ResultCache::new(store.clone(), config.result_key.clone());

        let context = Arc::new(WorkerContext {
            window: SlidingWindow::new(
                store,
                config.window_key.clone(),
                config.window_size,
                config.window_update,
            ),
            cache: cache.clone(),
            metrics: metrics.analysis.clone(),
            z_threshold: config.z_threshold,
        });

        let workers = WorkerPool::spawn(config.workers, receiver, context);

        Self {
            queue,
            cache,
            workers,
        }
    }
}
