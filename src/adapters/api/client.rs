//! Retrying HTTP Client - Bounded Exponential Backoff
//!
//! Wraps reqwest behind the `Fetcher` port. Every fetch gets up to
//! `RetryPolicy::max_attempts` transport calls; failed attempts sleep
//! `base_delay * backoff_factor^attempt` before the next try. Transient
//! failures never cross the port boundary — callers only see the final
//! `Exhausted`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::fetcher::{Exhausted, FetchFailure, Fetcher, RetryPolicy};

/// Trait for the raw, single-shot transport under the retry loop.
///
/// Exists so the retry behavior can be exercised against a scripted
/// fake; production code always uses `ReqwestTransport`.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
  /// Issue one GET and return the body text on a 2xx response.
  async fn get(&self, url: &str) -> Result<String, FetchFailure>;
}

/// reqwest-backed transport.
///
/// A non-2xx status is classified as `FetchFailure::Status`; everything
/// else reqwest reports (DNS, connect, timeout, TLS) becomes
/// `FetchFailure::Transport`.
pub struct ReqwestTransport {
  http: Client,
}

impl ReqwestTransport {
  /// Build the transport with a request timeout.
  pub fn new(timeout: Duration) -> Result<Self> {
    let http = Client::builder()
      .timeout(timeout)
      .pool_max_idle_per_host(2)
      .build()
      .context("Failed to build HTTP client")?;
    Ok(Self { http })
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn get(&self, url: &str) -> Result<String, FetchFailure> {
    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| FetchFailure::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(FetchFailure::Status(status.as_u16()));
    }

    response
      .text()
      .await
      .map_err(|e| FetchFailure::Transport(e.to_string()))
  }
}

/// Retrying fetcher over any transport.
pub struct RetryingFetcher<T: Transport = ReqwestTransport> {
  transport: T,
  policy: RetryPolicy,
}

impl RetryingFetcher<ReqwestTransport> {
  /// Build the production fetcher (reqwest transport).
  pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self> {
    Ok(Self {
      transport: ReqwestTransport::new(timeout)?,
      policy,
    })
  }
}

impl<T: Transport> RetryingFetcher<T> {
  /// Build a fetcher over an explicit transport (used by tests).
  pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
    Self { transport, policy }
  }

  /// The policy shared by every fetch through this client.
  pub fn policy(&self) -> &RetryPolicy {
    &self.policy
  }
}

#[async_trait]
impl<T: Transport> Fetcher for RetryingFetcher<T> {
  async fn fetch_text(&self, url: &str) -> Result<String, Exhausted> {
    let mut last: Option<FetchFailure> = None;

    for attempt in 0..self.policy.max_attempts {
      match self.transport.get(url).await {
        Ok(body) => {
          debug!(url, attempt, bytes = body.len(), "Fetch succeeded");
          return Ok(body);
        }
        Err(failure) => {
          warn!(url, attempt, error = %failure, "Fetch attempt failed");
          last = Some(failure);
          // No sleep after the final attempt
          if attempt + 1 < self.policy.max_attempts {
            let delay = self.policy.delay_for(attempt);
            debug!(url, delay_ms = delay.as_millis() as u64, "Backing off");
            sleep(delay).await;
          }
        }
      }
    }

    Err(Exhausted {
      url: url.to_string(),
      attempts: self.policy.max_attempts,
      last: last
        .unwrap_or_else(|| FetchFailure::Transport("no attempts were made".to_string())),
    })
  }
}
