//! Single-slot result cache

use crate::error::StoreResult;
use crate::store::WindowStore;
use loadwatch_types::Analysis;
use std::sync::Arc;

/// Holds the most recently persisted [`Analysis`] under one key
///
/// Last writer wins; no history is kept.
#[derive(Clone)]
pub struct ResultCache {
    store: Arc<dyn WindowStore>,
    key: String,
}

impl ResultCache {
    pub fn new(store: Arc<dyn WindowStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Overwrite the cached analysis
    pub async fn persist(&self, analysis: &Analysis) -> StoreResult<()> {
        let json = serde_json::to_string(analysis)?;
        self.store.set(&self.key, &json).await
    }

    /// Read the cached analysis; `None` if nothing was ever persisted
    pub async fn read(&self) -> StoreResult<Option<Analysis>> {
        match self.store.get(&self.key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
