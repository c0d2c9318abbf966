//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::address::is_valid_btc_address;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    name = %config.dashboard.name,
    has_address = config.miner.btc_address.is_some(),
    price_interval = config.poll.price_interval_secs,
    max_attempts = config.retry.max_attempts,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A usable retry budget and backoff curve
/// - Positive polling cadences
/// - Non-empty endpoint URLs
/// - A well-formed payout address when one is configured
fn validate_config(config: &AppConfig) -> Result<()> {
  // Retry validation
  anyhow::ensure!(
    config.retry.max_attempts >= 1,
    "retry.max_attempts must be >= 1, got {}",
    config.retry.max_attempts
  );
  anyhow::ensure!(
    config.retry.backoff_factor >= 1.0,
    "retry.backoff_factor must be >= 1.0, got {}",
    config.retry.backoff_factor
  );
  anyhow::ensure!(
    config.retry.base_delay_ms > 0,
    "retry.base_delay_ms must be positive"
  );

  // Cadence validation
  anyhow::ensure!(
    config.poll.price_interval_secs > 0
      && config.poll.pool_interval_secs > 0
      && config.poll.chain_interval_secs > 0
      && config.poll.timer_tick_secs > 0,
    "All polling intervals must be positive"
  );

  // Source validation
  anyhow::ensure!(
    !config.sources.price_url.is_empty(),
    "sources.price_url must not be empty"
  );
  anyhow::ensure!(
    !config.sources.mempool_base_url.is_empty(),
    "sources.mempool_base_url must not be empty"
  );
  anyhow::ensure!(
    config.sources.request_timeout_secs > 0,
    "sources.request_timeout_secs must be positive"
  );

  // History validation
  anyhow::ensure!(
    config.history.capacity >= 1,
    "history.capacity must be >= 1, got {}",
    config.history.capacity
  );

  // Address validation (only when configured)
  if let Some(address) = &config.miner.btc_address {
    anyhow::ensure!(
      is_valid_btc_address(address),
      "miner.btc_address is not a valid legacy BTC address: {address}"
    );
    anyhow::ensure!(
      config.sources.pool_url.contains("{address}"),
      "sources.pool_url must contain an {{address}} placeholder"
    );
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_gets_defaults() {
    let config: AppConfig = toml::from_str(
      r#"
      [dashboard]
      name = "bitaxe"
      "#,
    )
    .unwrap();
    validate_config(&config).unwrap();

    assert_eq!(config.dashboard.log_level, "info");
    assert_eq!(config.poll.price_interval_secs, 30);
    assert_eq!(config.poll.pool_interval_secs, 60);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay_ms, 1_000);
    assert_eq!(config.history.capacity, 10);
    assert!(config.miner.btc_address.is_none());
  }

  #[test]
  fn test_invalid_address_rejected() {
    let config: AppConfig = toml::from_str(
      r#"
      [dashboard]
      name = "bitaxe"

      [miner]
      btc_address = "not-an-address"
      "#,
    )
    .unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_zero_attempts_rejected() {
    let config: AppConfig = toml::from_str(
      r#"
      [dashboard]
      name = "bitaxe"

      [retry]
      max_attempts = 0
      "#,
    )
    .unwrap();
    assert!(validate_config(&config).is_err());
  }

  #[test]
  fn test_pool_url_substitution() {
    let config: AppConfig = toml::from_str(
      r#"
      [dashboard]
      name = "bitaxe"
      "#,
    )
    .unwrap();
    let url = config
      .sources
      .pool_stats_url("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    assert_eq!(
      url,
      "https://solo.ckpool.org/users/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"
    );
  }
}
