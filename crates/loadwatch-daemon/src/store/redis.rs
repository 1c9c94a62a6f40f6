//! Redis store implementation

use super::traits::WindowStore;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

/// Redis-backed store
///
/// Lists map onto LPUSH/LTRIM/LRANGE, values onto GET/SET. The connection
/// manager reconnects on its own; a failed call surfaces as a [`StoreError`].
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to `addr`, either `host:port` or a `redis://` URL
    pub async fn connect(addr: &str) -> StoreResult<Self> {
        let url = redis_url(addr);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| StoreError::Connection(format!("invalid address {}: {}", addr, e)))?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

/// Accept bare `host:port` the way the deployment environment provides it
fn redis_url(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else {
        format!("redis://{}", addr)
    }
}

/// LTRIM/LRANGE take inclusive stop indices
fn stop_index(len: usize) -> isize {
    len as isize - 1
}

#[async_trait]
impl WindowStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    async fn push_front(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.lpush(key, value).await?;
        Ok(())
    }

    async fn trim(&self, key: &str, len: usize) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.ltrim(key, 0, stop_index(len)).await?;
        Ok(())
    }

    async fn range(&self, key: &str, len: usize) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.lrange(key, 0, stop_index(len)).await?)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn push_trim_range(&self, key: &str, value: &str, len: usize) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let (window,): (Vec<String>,) = redis::pipe()
            .atomic()
            .lpush(key, value)
            .ignore()
            .ltrim(key, 0, stop_index(len))
            .ignore()
            .lrange(key, 0, stop_index(len))
            .query_async(&mut conn)
            .await?;
        Ok(window)
    }
}
