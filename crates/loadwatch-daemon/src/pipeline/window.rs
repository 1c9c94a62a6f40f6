//! Sliding-window adapter over the store

use crate::config::WindowUpdate;
use crate::error::StoreResult;
use crate::store::WindowStore;
use std::sync::Arc;

/// The shared, newest-first window of recent RPS values
#[derive(Clone)]
pub struct SlidingWindow {
    store: Arc<dyn WindowStore>,
    key: String,
    capacity: usize,
    update: WindowUpdate,
}

impl SlidingWindow {
    pub fn new(
        store: Arc<dyn WindowStore>,
        key: impl Into<String>,
        capacity: usize,
        update: WindowUpdate,
    ) -> Self {
        Self {
            store,
            key: key.into(),
            capacity,
            update,
        }
    }

    /// Window capacity `W`
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push `rps`, trim to capacity and return the parsed window
    ///
    /// With [`WindowUpdate::Sequential`] the returned window may include pushes
    /// from other workers made between the three store calls.
    pub async fn record(&self, rps: f64) -> StoreResult<Vec<f64>> {
        let value = rps.to_string();
        let raw = match self.update {
            WindowUpdate::Atomic => {
                self.store
                    .push_trim_range(&self.key, &value, self.capacity)
                    .await?
            }
            WindowUpdate::Sequential => {
                self.store.push_front(&self.key, &value).await?;
                self.store.trim(&self.key, self.capacity).await?;
                self.store.range(&self.key, self.capacity).await?
            }
        };
        Ok(parse_window(&raw))
    }
}

/// Parse stored entries, dropping anything that is not a finite number
pub fn parse_window(raw: &[String]) -> Vec<f64> {
    raw.iter()
        .filter_map(|entry| entry.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .collect()
}
