//! In-memory storage implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::errors::Result;

use super::Storage;

#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(at) if at <= now)
    }
}

/// Process-local [`Storage`] backed by a `HashMap`.
///
/// TTLs are enforced lazily: expired entries are treated as absent on read
/// and dropped on the next write under the same key. Suitable for tests and
/// single-process deployments; production setups put a shared store behind
/// the same trait.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn add(&self, key: &str, value: Value, ttl_minutes: i64) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Some(Utc::now() + Duration::minutes(ttl_minutes)),
            },
        );
        Ok(())
    }

    async fn forever(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let entries = self.entries.read().await;
        let now = Utc::now();
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn destroy(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(key).is_some())
    }

    async fn flush(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_then_get() {
        let storage = MemoryStorage::new();
        storage.add("key", json!({"n": 1}), 5).await.unwrap();

        assert_eq!(storage.get("key").await.unwrap(), Some(json!({"n": 1})));
    }

    #[tokio::test]
    async fn test_zero_ttl_is_immediately_expired() {
        let storage = MemoryStorage::new();
        storage.add("key", json!("v"), 0).await.unwrap();

        assert_eq!(storage.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_forever_entry_has_no_expiry() {
        let storage = MemoryStorage::new();
        storage.forever("key", json!("forever")).await.unwrap();

        assert_eq!(storage.get("key").await.unwrap(), Some(json!("forever")));
    }

    #[tokio::test]
    async fn test_destroy_reports_presence() {
        let storage = MemoryStorage::new();
        storage.forever("key", json!("v")).await.unwrap();

        assert!(storage.destroy("key").await.unwrap());
        assert!(!storage.destroy("key").await.unwrap());
        assert_eq!(storage.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_flush_erases_everything() {
        let storage = MemoryStorage::new();
        storage.add("a", json!(1), 5).await.unwrap();
        storage.forever("b", json!(2)).await.unwrap();

        storage.flush().await.unwrap();

        assert_eq!(storage.get("a").await.unwrap(), None);
        assert_eq!(storage.get("b").await.unwrap(), None);
    }
}
