//! Storage Port - Durable Key-Value Persistence Interface
//!
//! Defines the trait for the durable store that survives process
//! restarts. The dashboard keeps its address, last price and chart
//! history here; last-write-wins, no versioning.

use async_trait::async_trait;

/// Trait for durable key-value storage providers.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
  /// Read the value stored under `key`, if any.
  async fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

  /// Write `value` under `key`, overwriting unconditionally.
  async fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;

  /// Check the backing storage is usable (disk space, permissions).
  async fn is_healthy(&self) -> bool;
}
