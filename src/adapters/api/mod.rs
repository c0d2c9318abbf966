//! Public Data API Adapters
//!
//! Implements HTTP retrieval for the three public data sources the
//! dashboard polls (price quote, solo-pool user stats, mempool/fee
//! stats). All requests are unauthenticated GETs funneled through one
//! retrying client.
//!
//! Sub-modules:
//! - `client`: retrying HTTP client with exponential backoff
//! - `types`: upstream response shapes and typed validation

pub mod client;
pub mod types;

pub use client::{ReqwestTransport, RetryingFetcher};
