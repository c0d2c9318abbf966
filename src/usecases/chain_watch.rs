//! Chain Watcher - Tip, Mempool and Fee Polling Unit
//!
//! Polls three chain endpoints in one scheduled unit: the blocks
//! listing (tip height + timestamp, feeding the block timer), the
//! mempool summary and the recommended fees. The sub-fetches are
//! independent: one exhausted or malformed endpoint degrades only its
//! own cell. Also owns the 1-second timer tick between polls.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::adapters::api::types::{BlockSummary, FeeEstimates, MempoolSnapshot};
use crate::domain::block_clock::BlockClock;
use crate::domain::price::group_thousands;
use crate::ports::fetcher::{Fetcher, SourceError};
use crate::ports::render::{BlockView, FeeView, MempoolView, Renderer};

use super::state::DashboardState;

/// Polling unit for chain tip, mempool and fee data.
pub struct ChainWatcher<F, R> {
  fetcher: Arc<F>,
  state: Arc<RwLock<DashboardState>>,
  renderer: Arc<R>,
  blocks_url: String,
  mempool_url: String,
  fees_url: String,
}

impl<F, R> ChainWatcher<F, R>
where
  F: Fetcher,
  R: Renderer,
{
  pub fn new(
    fetcher: Arc<F>,
    state: Arc<RwLock<DashboardState>>,
    renderer: Arc<R>,
    blocks_url: String,
    mempool_url: String,
    fees_url: String,
  ) -> Self {
    Self {
      fetcher,
      state,
      renderer,
      blocks_url,
      mempool_url,
      fees_url,
    }
  }

  /// One scheduled execution; each sub-fetch degrades independently.
  pub async fn poll(&self) {
    self.refresh_tip().await;
    self.refresh_mempool().await;
    self.refresh_fees().await;
  }

  /// Timer tick between polls: re-render elapsed time off the last
  /// known tip. Nothing to show until the first tip arrives.
  pub async fn tick(&self) {
    let clock = self.state.read().await.block_clock;
    if let Some(clock) = clock {
      self.renderer.render_block_timer(&clock.view_at(now_ms()));
    }
  }

  async fn refresh_tip(&self) {
    match self.fetch_tip().await {
      Ok(tip) => {
        let clock = BlockClock {
          height: tip.height,
          timestamp_ms: tip.timestamp * 1000,
        };
        self.state.write().await.block_clock = Some(clock);
        debug!(height = tip.height, "Chain tip updated");
        self.renderer.render_block(&BlockView::Height(tip.height));
        self.renderer.render_block_timer(&clock.view_at(now_ms()));
      }
      Err(SourceError::Unavailable(e)) => {
        warn!(error = %e, "Blocks source unavailable");
        self.renderer.render_block(&BlockView::Unavailable);
      }
      Err(SourceError::Parse(e)) => {
        warn!(error = %e, "Blocks payload failed validation");
        self.renderer.render_block(&BlockView::ParseFailed);
      }
    }
  }

  async fn fetch_tip(&self) -> Result<BlockSummary, SourceError> {
    let body = self.fetcher.fetch_text(&self.blocks_url).await?;
    BlockSummary::parse_tip(&body)
  }

  async fn refresh_mempool(&self) {
    match self.fetch_mempool().await {
      Ok(snapshot) => {
        self
          .renderer
          .render_mempool(&MempoolView::Count(group_thousands(snapshot.count)));
      }
      Err(SourceError::Unavailable(e)) => {
        warn!(error = %e, "Mempool source unavailable");
        self.renderer.render_mempool(&MempoolView::Unavailable);
      }
      Err(SourceError::Parse(e)) => {
        warn!(error = %e, "Mempool payload failed validation");
        self.renderer.render_mempool(&MempoolView::ParseFailed);
      }
    }
  }

  async fn fetch_mempool(&self) -> Result<MempoolSnapshot, SourceError> {
    let body = self.fetcher.fetch_text(&self.mempool_url).await?;
    MempoolSnapshot::parse(&body)
  }

  async fn refresh_fees(&self) {
    match self.fetch_fees().await {
      Ok(fees) => {
        self
          .renderer
          .render_fees(&FeeView::FastestSatPerVb(fees.fastest_fee));
      }
      Err(SourceError::Unavailable(e)) => {
        warn!(error = %e, "Fees source unavailable");
        self.renderer.render_fees(&FeeView::Unavailable);
      }
      Err(SourceError::Parse(e)) => {
        warn!(error = %e, "Fees payload failed validation");
        self.renderer.render_fees(&FeeView::ParseFailed);
      }
    }
  }

  async fn fetch_fees(&self) -> Result<FeeEstimates, SourceError> {
    let body = self.fetcher.fetch_text(&self.fees_url).await?;
    FeeEstimates::parse(&body)
  }
}

/// Current wall-clock time in Unix milliseconds.
fn now_ms() -> u64 {
  Utc::now().timestamp_millis() as u64
}
