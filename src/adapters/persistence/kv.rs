//! JSON File Store - Atomic Key-Value Persistence
//!
//! Stores all dashboard keys in one `dashboard.json` object using
//! atomic writes (write to tmp file, then rename). This guarantees the
//! file is always either the old or new version, never a partial write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::ports::storage::KeyValueStore;

/// Durable key-value store backed by a single JSON object file.
///
/// The full map is loaded at open and kept in memory; every write
/// updates the map and flushes the whole file through a tmp → rename
/// cycle. One logical writer per key, last-write-wins.
pub struct JsonFileStore {
    /// Path to the store file.
    store_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
    /// In-memory view of the persisted map.
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or create) the store under the given data directory.
    pub async fn open(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        let store_path = dir.join("dashboard.json");
        let tmp_path = dir.join("dashboard.json.tmp");

        let entries = if store_path.exists() {
            let json = fs::read_to_string(&store_path)
                .await
                .context("Failed to read store file")?;
            let map: HashMap<String, String> =
                serde_json::from_str(&json).context("Failed to parse store JSON")?;
            info!(
                path = %store_path.display(),
                keys = map.len(),
                "Persisted dashboard state loaded"
            );
            map
        } else {
            info!(path = %store_path.display(), "No store file found, starting fresh");
            HashMap::new()
        };

        Ok(Self {
            store_path,
            tmp_path,
            entries: RwLock::new(entries),
        })
    }

    /// Serialize the current map and flush it atomically (tmp → rename).
    async fn flush(&self, snapshot: &HashMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .context("Failed to serialize store")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp store file")?;

        fs::rename(&self.tmp_path, &self.store_path)
            .await
            .context("Failed to rename store file")?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let snapshot = {
            let mut entries = self.entries.write().await;
            entries.insert(key.to_string(), value.to_string());
            entries.clone()
        };
        self.flush(&snapshot).await
    }

    async fn is_healthy(&self) -> bool {
        if !self.store_path.exists() {
            return true; // First run is OK
        }
        match fs::metadata(&self.store_path).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Store file unreadable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = std::env::temp_dir().join(format!("dash-kv-{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();

        let store = JsonFileStore::open(&dir).await.unwrap();
        store.write("last_price", "$50,000").await.unwrap();
        assert_eq!(
            store.read("last_price").await.unwrap().as_deref(),
            Some("$50,000")
        );

        // A fresh open sees the persisted value
        let reopened = JsonFileStore::open(&dir).await.unwrap();
        assert_eq!(
            reopened.read("last_price").await.unwrap().as_deref(),
            Some("$50,000")
        );

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = std::env::temp_dir().join(format!("dash-kv-none-{}", std::process::id()));
        let store = JsonFileStore::open(&dir.to_string_lossy()).await.unwrap();
        assert!(store.read("absent").await.unwrap().is_none());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_overwrite_is_last_write_wins() {
        let dir = std::env::temp_dir().join(format!("dash-kv-lww-{}", std::process::id()));
        let store = JsonFileStore::open(&dir.to_string_lossy()).await.unwrap();
        store.write("k", "first").await.unwrap();
        store.write("k", "second").await.unwrap();
        assert_eq!(store.read("k").await.unwrap().as_deref(), Some("second"));
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
