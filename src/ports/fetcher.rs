//! Fetcher Port - Retrying HTTP Retrieval Interface
//!
//! Defines the trait for fetching remote text payloads with bounded
//! retry, together with the retry policy and the error taxonomy shared
//! by all polling tasks. Transient failures (transport errors, non-2xx
//! statuses) are retried inside the implementor; callers only ever see
//! `Exhausted` once the whole attempt budget is spent.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Bounded exponential backoff parameters.
///
/// Shared by reference across every task that polls through the same
/// fetcher instance.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
  /// Maximum number of transport calls per fetch (>= 1).
  pub max_attempts: u32,
  /// Delay before the first retry.
  pub base_delay: Duration,
  /// Multiplier applied per retry.
  pub backoff_factor: f64,
}

impl RetryPolicy {
  /// Delay inserted after failed attempt `attempt` (0-based):
  /// `base_delay * backoff_factor^attempt`.
  pub fn delay_for(&self, attempt: u32) -> Duration {
    self
      .base_delay
      .mul_f64(self.backoff_factor.powi(attempt as i32))
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      base_delay: Duration::from_secs(1),
      backoff_factor: 2.0,
    }
  }
}

/// A single failed transport call.
///
/// A non-2xx status is retried exactly like a transport error.
#[derive(Debug, Clone, Error)]
pub enum FetchFailure {
  /// Network unreachable, connect/read timeout, TLS failure.
  #[error("transport error: {0}")]
  Transport(String),
  /// Response received with a non-success status.
  #[error("http status {0}")]
  Status(u16),
}

/// All retry attempts for a URL have been used up.
#[derive(Debug, Clone, Error)]
#[error("{url}: {attempts} attempts exhausted, last failure: {last}")]
pub struct Exhausted {
  /// The URL that could not be fetched.
  pub url: String,
  /// Number of transport calls made.
  pub attempts: u32,
  /// The failure from the final attempt.
  pub last: FetchFailure,
}

/// Task-level outcome of consuming a remote source.
#[derive(Debug, Error)]
pub enum SourceError {
  /// The fetcher gave up; the task should fall back to cache.
  #[error(transparent)]
  Unavailable(#[from] Exhausted),
  /// The payload arrived but did not match the expected shape.
  #[error("malformed payload: {0}")]
  Parse(String),
}

/// Trait for retrying HTTP retrieval providers.
///
/// Implementors perform the network call with bounded backoff-retry and
/// log transient failures; only `Exhausted` crosses this boundary.
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
  /// Fetch the response body at `url` as text.
  async fn fetch_text(&self, url: &str) -> Result<String, Exhausted>;
}
