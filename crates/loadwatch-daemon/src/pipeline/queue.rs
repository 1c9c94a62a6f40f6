//! Bounded admission queue between producers and workers

use crate::error::AdmissionError;
use loadwatch_observability::IngestMetrics;
use loadwatch_types::Sample;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Producer side of the queue
///
/// Admission never waits: a full queue rejects the sample immediately.
#[derive(Clone)]
pub struct AdmissionQueue {
    tx: mpsc::Sender<Sample>,
    metrics: IngestMetrics,
}

/// Consumer side of the queue, shared by all workers
///
/// Samples are handed out in FIFO order, one per `recv`.
#[derive(Clone)]
pub struct SampleReceiver {
    rx: Arc<Mutex<mpsc::Receiver<Sample>>>,
}

impl AdmissionQueue {
    /// Create a queue holding at most `capacity` samples
    pub fn new(capacity: usize, metrics: IngestMetrics) -> (Self, SampleReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self { tx, metrics },
            SampleReceiver {
                rx: Arc::new(Mutex::new(rx)),
            },
        )
    }

    /// Enqueue a sample for analysis
    ///
    /// Success means "accepted", not "processed".
    pub fn admit(&self, sample: Sample) -> Result<(), AdmissionError> {
        match self.tx.try_send(sample) {
            Ok(()) => {
                self.metrics.record_accepted();
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(AdmissionError::Overloaded),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(AdmissionError::Closed),
        }
    }

    /// Samples waiting for a worker
    pub fn depth(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

impl SampleReceiver {
    /// Wait for the next sample; `None` once every producer is gone and the queue is drained
    pub async fn recv(&self) -> Option<Sample> {
        self.rx.lock().await.recv().await
    }
}
