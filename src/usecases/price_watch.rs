//! Price Watcher - BTC Quote Polling Unit
//!
//! Polls the price quote endpoint. A fresh quote updates the trend,
//! the chart history and the stale cache, then renders; an exhausted
//! source falls back to the cached price marked stale; a payload that
//! fails validation renders the parse indicator. Storage failures are
//! logged and tolerated — the next cycle corrects the lost write.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::adapters::api::types::PriceQuote;
use crate::adapters::persistence::cache::{StaleCacheStore, keys};
use crate::domain::history::PriceSample;
use crate::domain::price::format_usd;
use crate::ports::fetcher::{Fetcher, SourceError};
use crate::ports::render::{ChartSeries, PriceView, Renderer};
use crate::ports::storage::KeyValueStore;

use super::state::DashboardState;

/// Polling unit for the BTC/USD price quote.
pub struct PriceWatcher<F, S, R> {
  fetcher: Arc<F>,
  cache: Arc<StaleCacheStore<S>>,
  state: Arc<RwLock<DashboardState>>,
  renderer: Arc<R>,
  url: String,
}

impl<F, S, R> PriceWatcher<F, S, R>
where
  F: Fetcher,
  S: KeyValueStore,
  R: Renderer,
{
  pub fn new(
    fetcher: Arc<F>,
    cache: Arc<StaleCacheStore<S>>,
    state: Arc<RwLock<DashboardState>>,
    renderer: Arc<R>,
    url: String,
  ) -> Self {
    Self {
      fetcher,
      cache,
      state,
      renderer,
      url,
    }
  }

  /// One scheduled execution; never fails upward.
  pub async fn poll(&self) {
    if let Err(err) = self.refresh().await {
      self.degrade(&err).await;
    }
  }

  async fn refresh(&self) -> Result<(), SourceError> {
    let body = self.fetcher.fetch_text(&self.url).await?;
    let quote = PriceQuote::parse(&body)?;
    let price = quote.usd();
    let text = format_usd(price);
    let label = Local::now().format("%H:%M:%S").to_string();

    let (trend, samples, labels, values) = {
      let mut state = self.state.write().await;
      let trend = state.observe_price(price);
      state.history.append(PriceSample { time: label, price });
      let samples = state.history.samples();
      let (labels, values) = state.history.series();
      (trend, samples, labels, values)
    };

    debug!(price, ?trend, "Fresh price quote");
    self.renderer.render_price(&PriceView::Fresh {
      text: text.clone(),
      trend,
    });
    self.renderer.render_chart(&ChartSeries { labels, values });

    if let Err(e) = self.cache.put(keys::LAST_PRICE, &text).await {
      warn!(error = %e, "Failed to persist last price");
    }
    if let Err(e) = self.cache.put_json(keys::PRICE_HISTORY, &samples).await {
      warn!(error = %e, "Failed to persist price history");
    }

    Ok(())
  }

  /// Render the degraded state for a failed cycle.
  async fn degrade(&self, err: &SourceError) {
    match err {
      SourceError::Unavailable(e) => {
        warn!(error = %e, "Price source unavailable, falling back to cache");
        match self.cache.get(keys::LAST_PRICE).await {
          Ok(Some(entry)) => {
            self.renderer.render_price(&PriceView::Cached { text: entry.value });
          }
          Ok(None) => self.renderer.render_price(&PriceView::Unavailable),
          Err(cache_err) => {
            warn!(error = %cache_err, "Cache read failed");
            self.renderer.render_price(&PriceView::Unavailable);
          }
        }
      }
      SourceError::Parse(e) => {
        warn!(error = %e, "Price payload failed validation");
        self.renderer.render_price(&PriceView::ParseFailed);
      }
    }
  }
}
