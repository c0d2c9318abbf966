//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! dashboard's polling workflows. Each watcher is one independently
//! scheduled polling unit.
//!
//! Use cases:
//! - `PollingScheduler`: fixed-interval task runner with shutdown
//! - `PriceWatcher`: BTC price quote, trend, history, cache fallback
//! - `PoolWatcher`: solo-pool miner statistics
//! - `ChainWatcher`: chain tip, mempool and fee stats, block timer
//! - `DashboardState`: shared application state restored from storage

pub mod chain_watch;
pub mod pool_watch;
pub mod price_watch;
pub mod scheduler;
pub mod state;

pub use chain_watch::ChainWatcher;
pub use pool_watch::PoolWatcher;
pub use price_watch::PriceWatcher;
pub use scheduler::PollingScheduler;
pub use state::DashboardState;
