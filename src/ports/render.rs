//! Renderer Port - Dashboard Presentation Interface
//!
//! Defines the trait through which tasks publish computed values, plus
//! the typed view models they hand over. All visual presentation is an
//! adapter concern; the degraded-state wording ("(cached)",
//! "Unavailable", "Parse error", "N/A") is fixed here so every renderer
//! shows failures the same way.

use std::fmt;

use crate::domain::block_clock::TimerView;
use crate::domain::price::Trend;

/// Current BTC price cell.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceView {
  /// Fresh quote with the move since the previous poll.
  Fresh { text: String, trend: Trend },
  /// Last cached quote, shown because the source is exhausted.
  Cached { text: String },
  /// Source exhausted and no cached value exists.
  Unavailable,
  /// Payload arrived but could not be validated.
  ParseFailed,
}

impl fmt::Display for PriceView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Fresh { text, trend } => write!(f, "{text} {}", trend.glyph()),
      Self::Cached { text } => write!(f, "{text} (cached)"),
      Self::Unavailable => write!(f, "Unavailable"),
      Self::ParseFailed => write!(f, "Parse error"),
    }
  }
}

/// Parallel label/value sequences for the price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
  pub labels: Vec<String>,
  pub values: Vec<f64>,
}

/// Solo-pool miner statistics cell.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolView {
  Stats(PoolStatsView),
  Unavailable,
  ParseFailed,
}

/// Individual pool stats fields; absent fields render as "N/A".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolStatsView {
  pub hashrate_1m: Option<String>,
  pub hashrate_5m: Option<String>,
  pub hashrate_1hr: Option<String>,
  pub best_share: Option<String>,
  /// Local datetime of the last accepted share.
  pub last_share: Option<String>,
}

impl PoolStatsView {
  /// The field value, or "N/A" when the pool omitted it.
  pub fn field_or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("N/A")
  }
}

/// Chain tip height cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockView {
  Height(u64),
  Unavailable,
  ParseFailed,
}

impl fmt::Display for BlockView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Height(h) => write!(f, "{h}"),
      Self::Unavailable => write!(f, "Unavailable"),
      Self::ParseFailed => write!(f, "Parse error"),
    }
  }
}

/// Mempool transaction count cell (pre-grouped for display).
#[derive(Debug, Clone, PartialEq)]
pub enum MempoolView {
  Count(String),
  Unavailable,
  ParseFailed,
}

impl fmt::Display for MempoolView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Count(c) => write!(f, "{c}"),
      Self::Unavailable => write!(f, "Unavailable"),
      Self::ParseFailed => write!(f, "Parse error"),
    }
  }
}

/// Recommended fee cell, sat/vB for next-block confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeView {
  FastestSatPerVb(u64),
  Unavailable,
  ParseFailed,
}

impl fmt::Display for FeeView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FastestSatPerVb(fee) => write!(f, "{fee} sat/vB"),
      Self::Unavailable => write!(f, "Unavailable"),
      Self::ParseFailed => write!(f, "Parse error"),
    }
  }
}

/// Trait for dashboard presentation providers.
///
/// Methods are synchronous and infallible: rendering must never stall a
/// polling task, and a renderer that cannot draw simply drops the frame.
pub trait Renderer: Send + Sync + 'static {
  /// Current price with trend / staleness marker.
  fn render_price(&self, view: &PriceView);

  /// Price history chart series.
  fn render_chart(&self, series: &ChartSeries);

  /// Solo-pool miner statistics.
  fn render_pool(&self, view: &PoolView);

  /// Chain tip height.
  fn render_block(&self, view: &BlockView);

  /// Elapsed-since-block timer.
  fn render_block_timer(&self, view: &TimerView);

  /// Mempool transaction count.
  fn render_mempool(&self, view: &MempoolView);

  /// Recommended fee estimate.
  fn render_fees(&self, view: &FeeView);
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cached_price_marks_staleness() {
    let view = PriceView::Cached {
      text: "$50,000".to_string(),
    };
    assert_eq!(view.to_string(), "$50,000 (cached)");
  }

  #[test]
  fn test_degraded_states_render_distinctly() {
    assert_eq!(PriceView::Unavailable.to_string(), "Unavailable");
    assert_eq!(PriceView::ParseFailed.to_string(), "Parse error");
  }

  #[test]
  fn test_missing_pool_field_renders_na() {
    let view = PoolStatsView::default();
    assert_eq!(PoolStatsView::field_or_na(&view.hashrate_1m), "N/A");
  }
}
