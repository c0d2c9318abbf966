//! Block Clock - Elapsed Time Since the Last Chain Tip
//!
//! Tracks the timestamp of the most recent block and derives the live
//! timer view: minutes/seconds elapsed, the rough remaining-time estimate
//! against the 10-minute average interval, and the near-block highlight.

/// Average block interval used for the remaining-time estimate.
const AVG_BLOCK_MINUTES: i64 = 10;

/// Elapsed minutes at which the timer is highlighted as "near block".
const NEAR_BLOCK_MINUTES: i64 = 8;

/// Last observed chain tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockClock {
    /// Block height of the tip.
    pub height: u64,
    /// Block timestamp in Unix milliseconds.
    pub timestamp_ms: u64,
}

/// Derived timer display values at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerView {
    /// Whole minutes elapsed since the tip.
    pub elapsed_min: i64,
    /// Remaining seconds within the current minute.
    pub elapsed_sec: i64,
    /// Estimated minutes until the next block; negative once overdue.
    pub est_remaining_min: i64,
    /// True once the average interval is nearly used up.
    pub near_block: bool,
}

impl BlockClock {
    /// Computes the timer view at `now_ms`.
    ///
    /// A clock skew that puts `now_ms` before the block timestamp is
    /// treated as zero elapsed.
    pub fn view_at(&self, now_ms: u64) -> TimerView {
        let elapsed_ms = now_ms.saturating_sub(self.timestamp_ms) as i64;
        let elapsed_min = elapsed_ms / 60_000;
        let elapsed_sec = (elapsed_ms % 60_000) / 1_000;
        TimerView {
            elapsed_min,
            elapsed_sec,
            est_remaining_min: AVG_BLOCK_MINUTES - elapsed_min,
            near_block: elapsed_min >= NEAR_BLOCK_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIP_MS: u64 = 1_700_000_000_000;

    fn clock() -> BlockClock {
        BlockClock {
            height: 870_000,
            timestamp_ms: TIP_MS,
        }
    }

    #[test]
    fn test_elapsed_breakdown() {
        let view = clock().view_at(TIP_MS + 3 * 60_000 + 42_000);
        assert_eq!(view.elapsed_min, 3);
        assert_eq!(view.elapsed_sec, 42);
        assert_eq!(view.est_remaining_min, 7);
        assert!(!view.near_block);
    }

    #[test]
    fn test_near_block_threshold() {
        let just_under = clock().view_at(TIP_MS + 7 * 60_000 + 59_000);
        assert!(!just_under.near_block);

        let at_threshold = clock().view_at(TIP_MS + 8 * 60_000);
        assert!(at_threshold.near_block);
    }

    #[test]
    fn test_overdue_block_goes_negative() {
        let view = clock().view_at(TIP_MS + 12 * 60_000);
        assert_eq!(view.est_remaining_min, -2);
        assert!(view.near_block);
    }

    #[test]
    fn test_clock_skew_clamps_to_zero() {
        let view = clock().view_at(TIP_MS - 5_000);
        assert_eq!(view.elapsed_min, 0);
        assert_eq!(view.elapsed_sec, 0);
    }
}
