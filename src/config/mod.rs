//! Configuration Module - TOML-based Dashboard Configuration
//!
//! Loads and validates configuration from `config.toml`. Endpoint URLs,
//! polling cadences and retry parameters are all externalized here -
//! nothing is hardcoded in the domain layer.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

use crate::ports::fetcher::RetryPolicy;

/// Top-level dashboard configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the dashboard begins polling.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Dashboard identity and logging.
  pub dashboard: DashboardConfig,
  /// Miner payout address.
  #[serde(default)]
  pub miner: MinerConfig,
  /// Remote data source endpoints.
  #[serde(default)]
  pub sources: SourcesConfig,
  /// Per-task polling cadences.
  #[serde(default)]
  pub poll: PollConfig,
  /// Retry/backoff parameters shared by all sources.
  #[serde(default)]
  pub retry: RetryConfig,
  /// Durable storage location.
  #[serde(default)]
  pub persistence: PersistenceConfig,
  /// Chart history sizing.
  #[serde(default)]
  pub history: HistoryConfig,
}

/// Dashboard identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
  /// Human-readable dashboard name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Miner payout address configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinerConfig {
  /// Legacy BTC payout address; pool stats are skipped when unset.
  pub btc_address: Option<String>,
}

/// Remote endpoint configuration.
///
/// `pool_url` carries an `{address}` placeholder substituted with the
/// configured payout address at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
  /// BTC/USD price quote endpoint.
  #[serde(default = "default_price_url")]
  pub price_url: String,
  /// Solo-pool per-user stats endpoint template.
  #[serde(default = "default_pool_url")]
  pub pool_url: String,
  /// Base URL for the blocks/mempool/fees endpoints.
  #[serde(default = "default_mempool_base_url")]
  pub mempool_base_url: String,
  /// Per-request timeout in seconds.
  #[serde(default = "default_request_timeout")]
  pub request_timeout_secs: u64,
}

impl SourcesConfig {
  /// Pool stats URL for a concrete payout address.
  pub fn pool_stats_url(&self, address: &str) -> String {
    self.pool_url.replace("{address}", address)
  }

  /// Blocks listing endpoint (newest first).
  pub fn blocks_url(&self) -> String {
    format!("{}/blocks", self.mempool_base_url)
  }

  /// Mempool summary endpoint.
  pub fn mempool_url(&self) -> String {
    format!("{}/mempool", self.mempool_base_url)
  }

  /// Recommended fees endpoint.
  pub fn fees_url(&self) -> String {
    format!("{}/v1/fees/recommended", self.mempool_base_url)
  }

  /// Per-request timeout as a duration.
  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }
}

impl Default for SourcesConfig {
  fn default() -> Self {
    Self {
      price_url: default_price_url(),
      pool_url: default_pool_url(),
      mempool_base_url: default_mempool_base_url(),
      request_timeout_secs: default_request_timeout(),
    }
  }
}

/// Polling cadence configuration (seconds).
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
  /// Price quote refresh period.
  #[serde(default = "default_price_interval")]
  pub price_interval_secs: u64,
  /// Pool stats refresh period.
  #[serde(default = "default_pool_interval")]
  pub pool_interval_secs: u64,
  /// Chain tip/mempool/fees refresh period.
  #[serde(default = "default_chain_interval")]
  pub chain_interval_secs: u64,
  /// Local block-timer tick period.
  #[serde(default = "default_timer_tick")]
  pub timer_tick_secs: u64,
}

impl Default for PollConfig {
  fn default() -> Self {
    Self {
      price_interval_secs: default_price_interval(),
      pool_interval_secs: default_pool_interval(),
      chain_interval_secs: default_chain_interval(),
      timer_tick_secs: default_timer_tick(),
    }
  }
}

/// Retry/backoff configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
  /// Maximum transport calls per fetch.
  #[serde(default = "default_max_attempts")]
  pub max_attempts: u32,
  /// Delay before the first retry, in milliseconds.
  #[serde(default = "default_base_delay_ms")]
  pub base_delay_ms: u64,
  /// Backoff multiplier per retry.
  #[serde(default = "default_backoff_factor")]
  pub backoff_factor: f64,
}

impl RetryConfig {
  /// The policy value handed to the fetcher.
  pub fn policy(&self) -> RetryPolicy {
    RetryPolicy {
      max_attempts: self.max_attempts,
      base_delay: Duration::from_millis(self.base_delay_ms),
      backoff_factor: self.backoff_factor,
    }
  }
}

impl Default for RetryConfig {
  fn default() -> Self {
    Self {
      max_attempts: default_max_attempts(),
      base_delay_ms: default_base_delay_ms(),
      backoff_factor: default_backoff_factor(),
    }
  }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for the dashboard state file.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

/// Chart history configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
  /// Number of price samples kept for the chart.
  #[serde(default = "default_history_capacity")]
  pub capacity: usize,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      capacity: default_history_capacity(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_price_url() -> String {
  "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd"
    .to_string()
}

fn default_pool_url() -> String {
  "https://solo.ckpool.org/users/{address}".to_string()
}

fn default_mempool_base_url() -> String {
  "https://mempool.space/api".to_string()
}

fn default_request_timeout() -> u64 {
  10
}

fn default_price_interval() -> u64 {
  30
}

fn default_pool_interval() -> u64 {
  60
}

fn default_chain_interval() -> u64 {
  30
}

fn default_timer_tick() -> u64 {
  1
}

fn default_max_attempts() -> u32 {
  3
}

fn default_base_delay_ms() -> u64 {
  1_000
}

fn default_backoff_factor() -> f64 {
  2.0
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_history_capacity() -> usize {
  10
}
