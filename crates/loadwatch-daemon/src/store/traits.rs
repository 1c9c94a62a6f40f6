//! Store trait definitions

use crate::error::StoreResult;
use async_trait::async_trait;

/// List/string primitives of the external window store
///
/// Lists are newest-first: `push_front` prepends, `trim` keeps the first
/// `len` entries and `range` reads the first `len` entries.
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Check the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Prepend a value to the list at `key`
    async fn push_front(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Keep only the first `len` entries of the list at `key`
    async fn trim(&self, key: &str, len: usize) -> StoreResult<()>;

    /// Read the first `len` entries of the list at `key`
    async fn range(&self, key: &str, len: usize) -> StoreResult<Vec<String>>;

    /// Read a string value
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite a string value, without expiry
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Push, trim and read back the list
    ///
    /// The default runs three independent calls, so concurrent callers may
    /// observe each other's pushes between them. Backends override this with
    /// a transactional version.
    async fn push_trim_range(&self, key: &str, value: &str, len: usize) -> StoreResult<Vec<String>> {
        self.push_front(key, value).await?;
        self.trim(key, len).await?;
        self.range(key, len).await
    }
}
