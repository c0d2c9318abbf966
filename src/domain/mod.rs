//! Domain layer - Core dashboard logic and models.
//!
//! This module contains the pure domain logic for the solo-mining dashboard.
//! No external dependencies allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod address;
pub mod block_clock;
pub mod history;
pub mod price;

// Re-export core types for convenience
pub use address::is_valid_btc_address;
pub use block_clock::BlockClock;
pub use history::{HistoryRingBuffer, PriceSample};
pub use price::{format_usd, group_thousands, Trend};
