//! Pool Watcher - Solo-Pool Miner Stats Polling Unit
//!
//! Polls the solo pool's per-user stats for the configured payout
//! address. Only registered when an address is configured. Absent
//! fields render as "N/A"; an exhausted source renders Unavailable and
//! a body that fails validation renders the parse indicator.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use tracing::warn;

use crate::adapters::api::types::PoolStats;
use crate::domain::price::group_thousands;
use crate::ports::fetcher::{Fetcher, SourceError};
use crate::ports::render::{PoolStatsView, PoolView, Renderer};

/// Polling unit for solo-pool miner statistics.
pub struct PoolWatcher<F, R> {
  fetcher: Arc<F>,
  renderer: Arc<R>,
  url: String,
}

impl<F, R> PoolWatcher<F, R>
where
  F: Fetcher,
  R: Renderer,
{
  /// Build the watcher for a stats URL with the address already
  /// substituted in.
  pub fn new(fetcher: Arc<F>, renderer: Arc<R>, url: String) -> Self {
    Self {
      fetcher,
      renderer,
      url,
    }
  }

  /// One scheduled execution; never fails upward.
  pub async fn poll(&self) {
    match self.refresh().await {
      Ok(view) => self.renderer.render_pool(&PoolView::Stats(view)),
      Err(SourceError::Unavailable(e)) => {
        warn!(error = %e, "Pool source unavailable");
        self.renderer.render_pool(&PoolView::Unavailable);
      }
      Err(SourceError::Parse(e)) => {
        warn!(error = %e, "Pool payload failed validation");
        self.renderer.render_pool(&PoolView::ParseFailed);
      }
    }
  }

  async fn refresh(&self) -> Result<PoolStatsView, SourceError> {
    let body = self.fetcher.fetch_text(&self.url).await?;
    let stats = PoolStats::parse(&body)?;
    Ok(to_view(stats))
  }
}

/// Map raw pool stats into display fields.
fn to_view(stats: PoolStats) -> PoolStatsView {
  PoolStatsView {
    hashrate_1m: stats.hashrate1m,
    hashrate_5m: stats.hashrate5m,
    hashrate_1hr: stats.hashrate1hr,
    best_share: stats.bestshare.map(format_share),
    last_share: stats.lastshare.and_then(format_share_time),
  }
}

/// Whole-number shares get thousands grouping; oddball fractional
/// difficulties are shown as reported.
fn format_share(share: f64) -> String {
  if share >= 0.0 && share.fract() == 0.0 {
    group_thousands(share as u64)
  } else {
    share.to_string()
  }
}

/// Render the last-share Unix timestamp as local wall-clock time.
fn format_share_time(unix_secs: u64) -> Option<String> {
  Local
    .timestamp_opt(unix_secs as i64, 0)
    .single()
    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_view_maps_missing_fields_to_none() {
    let view = to_view(PoolStats::default());
    assert!(view.hashrate_1m.is_none());
    assert!(view.best_share.is_none());
    assert!(view.last_share.is_none());
  }

  #[test]
  fn test_whole_best_share_is_grouped() {
    assert_eq!(format_share(8_123_456.0), "8,123,456");
    assert_eq!(format_share(1.5), "1.5");
  }

  #[test]
  fn test_last_share_formats_as_datetime() {
    let formatted = format_share_time(1_700_000_000).unwrap();
    // Local-timezone dependent; shape only
    assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
    assert!(formatted.contains(':'));
  }
}
