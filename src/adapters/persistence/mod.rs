//! Persistence Adapters - JSON File Storage
//!
//! Implements the KeyValueStore port with a single JSON file under the
//! data directory, written atomically, plus the typed stale-cache layer
//! the polling tasks fall back to when a source is exhausted.
//! No database dependency — lightweight and crash-recoverable.

pub mod cache;
pub mod kv;

pub use cache::{keys, CacheEntry, StaleCacheStore};
pub use kv::JsonFileStore;
