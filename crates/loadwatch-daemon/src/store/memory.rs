//! In-memory store implementation

use super::traits::WindowStore;
use crate::error::StoreResult;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store for development and testing
#[derive(Debug, Default)]
pub struct InMemoryStore {
    lists: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

fn head(list: Option<&VecDeque<String>>, len: usize) -> Vec<String> {
    list.map(|l| l.iter().take(len).cloned().collect())
        .unwrap_or_default()
}

#[async_trait]
impl WindowStore for InMemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn push_front(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut lists = self.lists.write().await;
        lists
            .entry(key.to_string())
            .or_default()
            .push_front(value.to_string());
        Ok(())
    }

    async fn trim(&self, key: &str, len: usize) -> StoreResult<()> {
        let mut lists = self.lists.write().await;
        if let Some(list) = lists.get_mut(key) {
            list.truncate(len);
            if list.is_empty() {
                lists.remove(key);
            }
        }
        Ok(())
    }

    async fn range(&self, key: &str, len: usize) -> StoreResult<Vec<String>> {
        let lists = self.lists.read().await;
        Ok(head(lists.get(key), len))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn push_trim_range(&self, key: &str, value: &str, len: usize) -> StoreResult<Vec<String>> {
        let mut lists = self.lists.write().await;
        let list = lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        list.truncate(len);
        Ok(list.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = InMemoryStore::new();
        for v in ["1", "2", "3"] {
            store.push_front("w", v).await.unwrap();
        }
        assert_eq!(store.range("w", 10).await.unwrap(), vec!["3", "2", "1"]);
        assert_eq!(store.range("w", 2).await.unwrap(), vec!["3", "2"]);
    }

    #[tokio::test]
    async fn test_trim_keeps_head() {
        let store = InMemoryStore::new();
        for v in ["1", "2", "3", "4"] {
            store.push_front("w", v).await.unwrap();
        }
        store.trim("w", 2).await.unwrap();
        assert_eq!(store.range("w", 10).await.unwrap(), vec!["4", "3"]);
    }

    #[tokio::test]
    async fn test_missing_keys() {
        let store = InMemoryStore::new();
        assert!(store.range("absent", 5).await.unwrap().is_empty());
        assert_eq!(store.get("absent").await.unwrap(), None);
        store.trim("absent", 5).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = InMemoryStore::new();
        store.set("k", "a").await.unwrap();
        store.set("k", "b").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_push_trim_range_matches_sequential() {
        let atomic = InMemoryStore::new();
        let sequential = InMemoryStore::new();

        for i in 0..7 {
            let v = i.to_string();
            let a = atomic.push_trim_range("w", &v, 3).await.unwrap();
            sequential.push_front("w", &v).await.unwrap();
            sequential.trim("w", 3).await.unwrap();
            let s = sequential.range("w", 3).await.unwrap();
            assert_eq!(a, s);
        }
        assert_eq!(atomic.range("w", 10).await.unwrap(), vec!["6", "5", "4"]);
    }
}
