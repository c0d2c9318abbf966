//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the dashboard's domain components
//! maintain their invariants across random inputs.

use proptest::prelude::*;

use btc_solo_dashboard::domain::address::is_valid_btc_address;
use btc_solo_dashboard::domain::history::{HistoryRingBuffer, PriceSample};
use btc_solo_dashboard::domain::price::group_thousands;
use btc_solo_dashboard::ports::fetcher::RetryPolicy;

fn sample(i: usize) -> PriceSample {
    PriceSample {
        time: format!("t{i}"),
        price: i as f64,
    }
}

// ── History Ring Buffer Properties ──────────────────────────

proptest! {
    /// The buffer never exceeds its capacity, no matter how many
    /// samples are appended.
    #[test]
    fn history_never_exceeds_capacity(
        capacity in 1usize..50,
        appends in 0usize..200,
    ) {
        let mut buf = HistoryRingBuffer::new(capacity);
        for i in 0..appends {
            buf.append(sample(i));
        }
        prop_assert!(buf.len() <= capacity);
        prop_assert_eq!(buf.len(), appends.min(capacity));
    }

    /// After capacity+k appends, exactly the last `capacity` samples
    /// survive, in arrival order.
    #[test]
    fn history_keeps_newest_samples_in_arrival_order(
        capacity in 1usize..30,
        overflow in 1usize..50,
    ) {
        let total = capacity + overflow;
        let mut buf = HistoryRingBuffer::new(capacity);
        for i in 0..total {
            buf.append(sample(i));
        }

        let (labels, values) = buf.series();
        prop_assert_eq!(labels.len(), capacity);
        prop_assert_eq!(values.len(), capacity);
        for (offset, value) in values.iter().enumerate() {
            prop_assert_eq!(*value, (overflow + offset) as f64);
        }
    }

    /// Restoring from persisted samples is equivalent to appending
    /// them one by one.
    #[test]
    fn history_restore_matches_replay(
        capacity in 1usize..20,
        count in 0usize..60,
    ) {
        let samples: Vec<_> = (0..count).map(sample).collect();

        let restored = HistoryRingBuffer::from_samples(capacity, samples.clone());
        let mut replayed = HistoryRingBuffer::new(capacity);
        for s in samples {
            replayed.append(s);
        }

        prop_assert_eq!(restored.samples(), replayed.samples());
    }
}

// ── Retry Policy Properties ─────────────────────────────────

proptest! {
    /// The first backoff delay equals the base delay.
    #[test]
    fn backoff_starts_at_base_delay(
        base_ms in 1u64..10_000,
        factor in 1.0f64..4.0,
    ) {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: std::time::Duration::from_millis(base_ms),
            backoff_factor: factor,
        };
        prop_assert_eq!(policy.delay_for(0), policy.base_delay);
    }

    /// Consecutive delays grow by exactly the backoff factor.
    #[test]
    fn backoff_grows_geometrically(
        base_ms in 1u64..5_000,
        factor in 1.0f64..4.0,
        attempt in 0u32..8,
    ) {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: std::time::Duration::from_millis(base_ms),
            backoff_factor: factor,
        };
        let current = policy.delay_for(attempt).as_secs_f64();
        let next = policy.delay_for(attempt + 1).as_secs_f64();
        prop_assert!(
            (next - current * factor).abs() < 1e-6 * next.max(1.0),
            "delay[{}]={next} should be delay[{}]={current} x {factor}",
            attempt + 1,
            attempt
        );
    }
}

// ── Display Formatting Properties ───────────────────────────

proptest! {
    /// Thousands grouping only inserts commas; the digits survive.
    #[test]
    fn grouping_preserves_digits(n in any::<u64>()) {
        let grouped = group_thousands(n);
        let stripped: String = grouped.chars().filter(|c| *c != ',').collect();
        prop_assert_eq!(stripped, n.to_string());
    }

    /// No group between commas is longer than three digits.
    #[test]
    fn grouping_chunks_are_at_most_three(n in any::<u64>()) {
        let grouped = group_thousands(n);
        for chunk in grouped.split(',') {
            prop_assert!(!chunk.is_empty() && chunk.len() <= 3);
        }
    }
}

// ── Address Grammar Properties ──────────────────────────────

const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

proptest! {
    /// Addresses built from the accepted grammar always validate.
    #[test]
    fn well_formed_legacy_addresses_accepted(
        prefix in prop::sample::select(vec!['1', '3']),
        body in prop::collection::vec(prop::sample::select(BASE58.to_vec()), 25..=34),
    ) {
        let address: String =
            std::iter::once(prefix).chain(body.into_iter().map(char::from)).collect();
        prop_assert!(is_valid_btc_address(&address));
    }

    /// Any other leading character is rejected regardless of body.
    #[test]
    fn wrong_prefix_rejected(
        prefix in prop::sample::select(b"245679ABCXYZbcxyz".to_vec()),
        body in prop::collection::vec(prop::sample::select(BASE58.to_vec()), 25..=34),
    ) {
        let address: String = std::iter::once(char::from(prefix))
            .chain(body.into_iter().map(char::from))
            .collect();
        prop_assert!(!is_valid_btc_address(&address));
    }

    /// Too-short and too-long bodies are rejected.
    #[test]
    fn wrong_length_rejected(
        prefix in prop::sample::select(vec!['1', '3']),
        short_body in prop::collection::vec(prop::sample::select(BASE58.to_vec()), 0..25),
    ) {
        let address: String = std::iter::once(prefix)
            .chain(short_body.into_iter().map(char::from))
            .collect();
        prop_assert!(!is_valid_btc_address(&address));
    }
}
