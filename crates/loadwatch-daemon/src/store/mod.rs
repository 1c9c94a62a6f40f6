//! Store layer for loadwatch-daemon
//!
//! The sliding window and the last analysis live in an external ordered-list
//! store shared by every worker (and every daemon replica). Backends expose the
//! list/string primitives; the window and cache adapters in
//! [`crate::pipeline`] build the protocol on top.

mod memory;
mod redis;
mod traits;

pub use self::redis::RedisStore;
pub use memory::InMemoryStore;
pub use traits::WindowStore;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use std::sync::Arc;

/// Connect the backend selected by configuration and verify it answers
pub async fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn WindowStore>> {
    let store: Arc<dyn WindowStore> = match config {
        StoreConfig::Memory => Arc::new(InMemoryStore::new()),
        StoreConfig::Redis { addr } => Arc::new(RedisStore::connect(addr).await?),
    };
    store.ping().await?;
    Ok(store)
}
