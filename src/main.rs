//! BTC Solo Dashboard — Entry Point
//!
//! Initializes configuration, logging, durable storage and the polling
//! scheduler. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the durable store + stale cache, restore dashboard state
//! 4. Create the retrying fetcher (HTTP + backoff retry)
//! 5. Create the terminal renderer
//! 6. Register polling tasks (price, pool, chain, block timer)
//! 7. Start the scheduler — every task runs once immediately
//! 8. Wait for SIGINT → broadcast shutdown → bounded join

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::{RwLock, broadcast};
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::RetryingFetcher;
use adapters::persistence::{JsonFileStore, StaleCacheStore, keys};
use adapters::render::TermRenderer;
use usecases::{ChainWatcher, DashboardState, PollingScheduler, PoolWatcher, PriceWatcher};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.dashboard.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.dashboard.name,
        version = env!("CARGO_PKG_VERSION"),
        has_address = config.miner.btc_address.is_some(),
        "Starting BTC solo dashboard"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Durable store, stale cache, restored state ───────
    let store = JsonFileStore::open(&config.persistence.data_dir)
        .await
        .context("Failed to open dashboard store")?;
    let cache = Arc::new(StaleCacheStore::new(store));
    let state = Arc::new(RwLock::new(
        DashboardState::restore(&cache, config.history.capacity).await,
    ));

    // ── 5. Retrying fetcher shared by every task ────────────
    let fetcher = Arc::new(
        RetryingFetcher::new(config.sources.request_timeout(), config.retry.policy())
            .context("Failed to create HTTP fetcher")?,
    );

    // ── 6. Terminal renderer ────────────────────────────────
    let renderer = Arc::new(TermRenderer::new());

    // ── 7. Register polling tasks ───────────────────────────
    let mut scheduler = PollingScheduler::new(shutdown_tx.clone());

    let price_watcher = Arc::new(PriceWatcher::new(
        Arc::clone(&fetcher),
        Arc::clone(&cache),
        Arc::clone(&state),
        Arc::clone(&renderer),
        config.sources.price_url.clone(),
    ));
    scheduler.register(
        "price-watch",
        Duration::from_secs(config.poll.price_interval_secs),
        move || {
            let watcher = Arc::clone(&price_watcher);
            async move { watcher.poll().await }
        },
    );

    if let Some(address) = &config.miner.btc_address {
        if let Err(e) = cache.put(keys::BTC_ADDRESS, address).await {
            tracing::warn!(error = %e, "Failed to persist payout address");
        }

        let pool_watcher = Arc::new(PoolWatcher::new(
            Arc::clone(&fetcher),
            Arc::clone(&renderer),
            config.sources.pool_stats_url(address),
        ));
        scheduler.register(
            "pool-watch",
            Duration::from_secs(config.poll.pool_interval_secs),
            move || {
                let watcher = Arc::clone(&pool_watcher);
                async move { watcher.poll().await }
            },
        );
    } else {
        info!("No payout address configured, pool stats disabled");
    }

    let chain_watcher = Arc::new(ChainWatcher::new(
        Arc::clone(&fetcher),
        Arc::clone(&state),
        Arc::clone(&renderer),
        config.sources.blocks_url(),
        config.sources.mempool_url(),
        config.sources.fees_url(),
    ));
    let chain_poll = Arc::clone(&chain_watcher);
    scheduler.register(
        "chain-watch",
        Duration::from_secs(config.poll.chain_interval_secs),
        move || {
            let watcher = Arc::clone(&chain_poll);
            async move { watcher.poll().await }
        },
    );
    scheduler.register(
        "block-timer",
        Duration::from_secs(config.poll.timer_tick_secs),
        move || {
            let watcher = Arc::clone(&chain_watcher);
            async move { watcher.tick().await }
        },
    );

    // ── 8. Start the scheduler ──────────────────────────────
    let handles = scheduler.start();
    info!("All tasks spawned — dashboard is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    // ── Graceful shutdown ───────────────────────────────────
    let _ = shutdown_tx.send(());
    info!("Shutdown signal broadcast to all tasks");

    for handle in handles {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    info!("Shutdown complete");
    Ok(())
}
