//! Upstream Response Shapes and Typed Validation
//!
//! Deserialization types for the three public data sources. Each shape
//! owns its `parse` so tasks never touch raw serde errors; anything
//! that does not validate becomes `SourceError::Parse`.

use serde::Deserialize;

use crate::ports::fetcher::SourceError;

/// CoinGecko simple-price response: `{"bitcoin":{"usd":50000.0}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuote {
  pub bitcoin: UsdQuote,
}

/// Inner currency map of the price quote.
#[derive(Debug, Clone, Deserialize)]
pub struct UsdQuote {
  /// BTC price in USD.
  pub usd: f64,
}

impl PriceQuote {
  /// Validate a price payload into a typed quote.
  pub fn parse(body: &str) -> Result<Self, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
  }

  /// The quoted USD price.
  pub fn usd(&self) -> f64 {
    self.bitcoin.usd
  }
}

/// Solo-pool per-user statistics.
///
/// All fields are optional: the pool omits fields for users with no
/// accepted shares yet, and the view layer renders absences as "N/A".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolStats {
  /// Hashrate over the last minute (e.g. "1.21T").
  pub hashrate1m: Option<String>,
  /// Hashrate over the last five minutes.
  pub hashrate5m: Option<String>,
  /// Hashrate over the last hour.
  pub hashrate1hr: Option<String>,
  /// Best share difficulty ever submitted.
  pub bestshare: Option<f64>,
  /// Unix timestamp (seconds) of the last accepted share.
  pub lastshare: Option<u64>,
}

impl PoolStats {
  /// Validate a pool stats payload into typed fields.
  ///
  /// The pool endpoint has been observed to return both a proper JSON
  /// object and a brace-less field list (`"hashrate1m": "1T", ...`);
  /// accept either, reject everything else.
  pub fn parse(body: &str) -> Result<Self, SourceError> {
    let trimmed = body.trim();
    let direct: Result<Self, _> = serde_json::from_str(trimmed);
    match direct {
      Ok(stats) => Ok(stats),
      Err(first_err) => {
        if trimmed.starts_with('{') {
          return Err(SourceError::Parse(first_err.to_string()));
        }
        let wrapped = format!("{{{trimmed}}}");
        serde_json::from_str(&wrapped)
          .map_err(|e| SourceError::Parse(e.to_string()))
      }
    }
  }
}

/// One block from the blocks listing; only the tip fields we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSummary {
  /// Block height.
  pub height: u64,
  /// Block timestamp, Unix seconds.
  pub timestamp: u64,
}

impl BlockSummary {
  /// Validate a blocks payload (JSON array, newest first) into its tip.
  pub fn parse_tip(body: &str) -> Result<Self, SourceError> {
    let blocks: Vec<Self> =
      serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;
    blocks
      .into_iter()
      .next()
      .ok_or_else(|| SourceError::Parse("empty blocks array".to_string()))
  }
}

/// Mempool summary; only the transaction count is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct MempoolSnapshot {
  /// Number of unconfirmed transactions.
  pub count: u64,
}

impl MempoolSnapshot {
  /// Validate a mempool payload.
  pub fn parse(body: &str) -> Result<Self, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
  }
}

/// Recommended fee tiers; only the fastest tier is consumed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimates {
  /// Sat/vB for next-block confirmation.
  pub fastest_fee: u64,
}

impl FeeEstimates {
  /// Validate a recommended-fees payload.
  pub fn parse(body: &str) -> Result<Self, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_price_quote_deserialization() {
    let quote = PriceQuote::parse(r#"{"bitcoin":{"usd":50000.0}}"#).unwrap();
    assert_eq!(quote.usd(), 50_000.0);
  }

  #[test]
  fn test_price_quote_rejects_wrong_shape() {
    assert!(PriceQuote::parse(r#"{"ethereum":{"usd":3000}}"#).is_err());
    assert!(PriceQuote::parse("not json").is_err());
  }

  #[test]
  fn test_pool_stats_braced_body() {
    let stats = PoolStats::parse(
      r#"{"hashrate1m": "1.21T", "hashrate5m": "1.19T", "bestshare": 8123456.0}"#,
    )
    .unwrap();
    assert_eq!(stats.hashrate1m.as_deref(), Some("1.21T"));
    assert_eq!(stats.bestshare, Some(8_123_456.0));
    assert!(stats.lastshare.is_none());
  }

  #[test]
  fn test_pool_stats_braceless_body() {
    let stats =
      PoolStats::parse(r#""hashrate1m": "950G", "lastshare": 1700000000"#).unwrap();
    assert_eq!(stats.hashrate1m.as_deref(), Some("950G"));
    assert_eq!(stats.lastshare, Some(1_700_000_000));
  }

  #[test]
  fn test_pool_stats_rejects_garbage() {
    assert!(matches!(
      PoolStats::parse("<html>502 Bad Gateway</html>"),
      Err(SourceError::Parse(_))
    ));
  }

  #[test]
  fn test_blocks_tip_is_first_element() {
    let body = r#"[
      {"height": 870001, "timestamp": 1700000600, "tx_count": 3000},
      {"height": 870000, "timestamp": 1700000000, "tx_count": 2500}
    ]"#;
    let tip = BlockSummary::parse_tip(body).unwrap();
    assert_eq!(tip.height, 870_001);
    assert_eq!(tip.timestamp, 1_700_000_600);
  }

  #[test]
  fn test_empty_blocks_array_is_parse_error() {
    assert!(BlockSummary::parse_tip("[]").is_err());
  }

  #[test]
  fn test_mempool_and_fees_deserialization() {
    let mempool = MempoolSnapshot::parse(r#"{"count": 45123, "vsize": 90000}"#).unwrap();
    assert_eq!(mempool.count, 45_123);

    let fees =
      FeeEstimates::parse(r#"{"fastestFee": 32, "halfHourFee": 20, "hourFee": 12}"#)
        .unwrap();
    assert_eq!(fees.fastest_fee, 32);
  }
}
