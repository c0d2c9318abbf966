//! Stale Cache Store - Typed Fallback Layer over Key-Value Storage
//!
//! Keeps the latest successfully fetched value per key, stamped with
//! its write time. When a source exhausts its retries, the owning task
//! reads this cache and renders the value marked stale; when no entry
//! exists the task renders an explicit Unavailable state instead.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ports::storage::KeyValueStore;

/// Well-known cache keys (the persisted dashboard vocabulary).
pub mod keys {
    /// Configured miner payout address.
    pub const BTC_ADDRESS: &str = "btc_address";
    /// Last successfully rendered price string.
    pub const LAST_PRICE: &str = "last_price";
    /// Serialized price history samples.
    pub const PRICE_HISTORY: &str = "price_history";
}

/// One cached value with its write timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload (display string or serialized JSON).
    pub value: String,
    /// Write time, Unix milliseconds.
    pub timestamp_ms: u64,
}

/// Typed cache layer over any durable key-value store.
pub struct StaleCacheStore<S> {
    store: S,
}

impl<S: KeyValueStore> StaleCacheStore<S> {
    /// Wrap a durable store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the cached entry for `key`, if one was ever written.
    pub async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        match self.store.read(key).await? {
            None => Ok(None),
            Some(json) => {
                let entry: CacheEntry = serde_json::from_str(&json)
                    .with_context(|| format!("Corrupt cache entry for {key}"))?;
                Ok(Some(entry))
            }
        }
    }

    /// Overwrite the entry for `key`, stamped with the current time.
    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            timestamp_ms: chrono::Utc::now().timestamp_millis() as u64,
        };
        let json = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;
        self.store.write(key, &json).await
    }

    /// Read and deserialize a structured value stored under `key`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            None => Ok(None),
            Some(entry) => {
                let value: T = serde_json::from_str(&entry.value)
                    .with_context(|| format!("Corrupt structured cache entry for {key}"))?;
                Ok(Some(value))
            }
        }
    }

    /// Serialize and store a structured value under `key`.
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).context("Failed to serialize cache value")?;
        self.put(key, &json).await
    }

    /// Whether the backing store is usable.
    pub async fn is_healthy(&self) -> bool {
        self.store.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;

    /// In-memory store for cache-layer tests.
    #[derive(Default)]
    struct MemStore {
        map: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStore for MemStore {
        async fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.map.lock().await.get(key).cloned())
        }

        async fn write(&self, key: &str, value: &str) -> Result<()> {
            self.map.lock().await.insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn is_healthy(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_put_stamps_and_get_round_trips() {
        let cache = StaleCacheStore::new(MemStore::default());
        cache.put(keys::LAST_PRICE, "$50,000").await.unwrap();

        let entry = cache.get(keys::LAST_PRICE).await.unwrap().unwrap();
        assert_eq!(entry.value, "$50,000");
        assert!(entry.timestamp_ms > 0);
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let cache = StaleCacheStore::new(MemStore::default());
        assert!(cache.get("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_json_round_trips_structured_values() {
        let cache = StaleCacheStore::new(MemStore::default());
        let samples = vec![("10:00:00".to_string(), 50_000.0)];
        cache.put_json(keys::PRICE_HISTORY, &samples).await.unwrap();

        let restored: Vec<(String, f64)> =
            cache.get_json(keys::PRICE_HISTORY).await.unwrap().unwrap();
        assert_eq!(restored, samples);
    }

    #[tokio::test]
    async fn test_corrupt_entry_surfaces_as_error() {
        let store = MemStore::default();
        store.write(keys::LAST_PRICE, "not an entry").await.unwrap();
        let cache = StaleCacheStore::new(store);
        assert!(cache.get(keys::LAST_PRICE).await.is_err());
    }
}
