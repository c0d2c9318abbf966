//! Dashboard State - Shared Application State
//!
//! The explicit state struct shared by the polling tasks: previous
//! price for trend detection, the chart history buffer, and the last
//! observed chain tip. Restored from durable storage at startup and
//! mutated only inside task executions (behind one `RwLock`).

use tracing::{info, warn};

use crate::adapters::persistence::cache::{StaleCacheStore, keys};
use crate::domain::block_clock::BlockClock;
use crate::domain::history::{HistoryRingBuffer, PriceSample};
use crate::domain::price::Trend;
use crate::ports::storage::KeyValueStore;

/// Mutable dashboard state shared across tasks.
#[derive(Debug)]
pub struct DashboardState {
  /// Price seen on the previous poll; `None` until the first success.
  pub prev_price: Option<f64>,
  /// Chart history buffer.
  pub history: HistoryRingBuffer,
  /// Last observed chain tip, if any.
  pub block_clock: Option<BlockClock>,
}

impl DashboardState {
  /// Fresh state with an empty history of the given capacity.
  pub fn new(history_capacity: usize) -> Self {
    Self {
      prev_price: None,
      history: HistoryRingBuffer::new(history_capacity),
      block_clock: None,
    }
  }

  /// Restore state from the cache store.
  ///
  /// Only the price history survives restarts; the previous price and
  /// block clock start empty and refill on the first poll cycle. A
  /// corrupt history entry is dropped with a warning rather than
  /// blocking startup.
  pub async fn restore<S: KeyValueStore>(
    cache: &StaleCacheStore<S>,
    history_capacity: usize,
  ) -> Self {
    let history = match cache.get_json::<Vec<PriceSample>>(keys::PRICE_HISTORY).await {
      Ok(Some(samples)) => {
        info!(samples = samples.len(), "Price history restored");
        HistoryRingBuffer::from_samples(history_capacity, samples)
      }
      Ok(None) => HistoryRingBuffer::new(history_capacity),
      Err(e) => {
        warn!(error = %e, "Discarding unreadable price history");
        HistoryRingBuffer::new(history_capacity)
      }
    };

    Self {
      prev_price: None,
      history,
      block_clock: None,
    }
  }

  /// Record a fresh price observation and classify the move.
  pub fn observe_price(&mut self, price: f64) -> Trend {
    let trend = Trend::from_change(self.prev_price, price);
    self.prev_price = Some(price);
    trend
  }
}
