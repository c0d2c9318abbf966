//! Price History Ring Buffer
//!
//! Fixed-capacity FIFO sequence of timestamped price samples feeding the
//! chart series. The newest sample lives at the tail; once the buffer is
//! full the oldest sample is evicted from the head.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of samples kept for the chart.
pub const DEFAULT_CAPACITY: usize = 10;

/// A single charted price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Display label, local wall-clock time ("HH:MM:SS").
    pub time: String,
    /// Price in USD at observation time.
    pub price: f64,
}

/// Bounded, ordered price sample buffer.
///
/// Invariant: `len() <= capacity` at all times. Samples are ordered by
/// arrival; `series()` yields oldest-to-newest.
#[derive(Debug, Clone)]
pub struct HistoryRingBuffer {
    samples: VecDeque<PriceSample>,
    capacity: usize,
}

impl HistoryRingBuffer {
    /// Creates an empty buffer with the given capacity (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuilds a buffer from previously persisted samples.
    ///
    /// Samples beyond capacity are trimmed from the front, keeping the
    /// newest `capacity` entries in arrival order.
    pub fn from_samples(capacity: usize, samples: Vec<PriceSample>) -> Self {
        let mut buf = Self::new(capacity);
        for sample in samples {
            buf.append(sample);
        }
        buf
    }

    /// Appends a sample at the tail, evicting from the head if full.
    pub fn append(&mut self, sample: PriceSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples oldest-to-newest, for persistence.
    pub fn samples(&self) -> Vec<PriceSample> {
        self.samples.iter().cloned().collect()
    }

    /// Parallel label/value sequences, oldest-to-newest, for the chart.
    pub fn series(&self) -> (Vec<String>, Vec<f64>) {
        let labels = self.samples.iter().map(|s| s.time.clone()).collect();
        let values = self.samples.iter().map(|s| s.price).collect();
        (labels, values)
    }
}

impl Default for HistoryRingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
