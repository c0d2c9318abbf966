//! Terminal Renderer - Labeled Line Output
//!
//! Writes each dashboard cell as a labeled line to stdout. Every call
//! replaces the previous value of that cell conceptually; a terminal
//! multiplexer or `watch`-style consumer turns this into a live view.

use std::io::Write;

use crate::domain::block_clock::TimerView;
use crate::ports::render::{
    BlockView, ChartSeries, FeeView, MempoolView, PoolStatsView, PoolView, PriceView,
    Renderer,
};

/// Line-oriented terminal renderer.
///
/// Rendering is infallible by contract: a failed write to stdout drops
/// the frame silently rather than disturbing the polling tasks.
pub struct TermRenderer;

impl TermRenderer {
    pub fn new() -> Self {
        Self
    }

    fn line(&self, label: &str, value: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{label:<14} {value}");
    }

    fn pool_stats(&self, stats: &PoolStatsView) {
        self.line("hashrate 1m", PoolStatsView::field_or_na(&stats.hashrate_1m));
        self.line("hashrate 5m", PoolStatsView::field_or_na(&stats.hashrate_5m));
        self.line("hashrate 1hr", PoolStatsView::field_or_na(&stats.hashrate_1hr));
        self.line("best share", PoolStatsView::field_or_na(&stats.best_share));
        self.line("last share", PoolStatsView::field_or_na(&stats.last_share));
    }
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TermRenderer {
    fn render_price(&self, view: &PriceView) {
        self.line("BTC price", &view.to_string());
    }

    fn render_chart(&self, series: &ChartSeries) {
        if series.values.is_empty() {
            return;
        }
        let points: Vec<String> = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(t, p)| format!("{t}={p}"))
            .collect();
        self.line("history", &points.join(" "));
    }

    fn render_pool(&self, view: &PoolView) {
        match view {
            PoolView::Stats(stats) => self.pool_stats(stats),
            PoolView::Unavailable => self.line("pool", "Unavailable"),
            PoolView::ParseFailed => self.line("pool", "Parse error"),
        }
    }

    fn render_block(&self, view: &BlockView) {
        self.line("block height", &view.to_string());
    }

    fn render_block_timer(&self, view: &TimerView) {
        let marker = if view.near_block { " ⚡" } else { "" };
        self.line(
            "since block",
            &format!("{}m {}s{marker}", view.elapsed_min, view.elapsed_sec),
        );
        self.line(
            "next block",
            &format!("~{}min remaining (avg)", view.est_remaining_min),
        );
    }

    fn render_mempool(&self, view: &MempoolView) {
        self.line("mempool txs", &view.to_string());
    }

    fn render_fees(&self, view: &FeeView) {
        self.line("fastest fee", &view.to_string());
    }
}
