//! BTC Payout Address Validation
//!
//! Format check for the miner payout address before it is used to build
//! pool stats URLs. Accepts legacy base58 addresses (leading `1` or `3`,
//! 26-35 characters); bech32 addresses are intentionally rejected since
//! the solo pool credits legacy payout addresses.

/// Characters permitted in base58check (no `0`, `O`, `I`, `l`).
fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

/// Returns true when `address` matches the legacy BTC address grammar.
///
/// This is a format check only; no checksum verification is performed.
pub fn is_valid_btc_address(address: &str) -> bool {
    let mut chars = address.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '1' | '3') {
        return false;
    }
    let rest_len = address.len() - 1;
    (25..=34).contains(&rest_len) && chars.all(is_base58)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_known_legacy_addresses() {
        // Genesis block coinbase address
        assert!(is_valid_btc_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
        assert!(is_valid_btc_address("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"));
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        assert!(!is_valid_btc_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"));
        assert!(!is_valid_btc_address("2A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"));
    }

    #[test]
    fn test_rejects_bad_length() {
        assert!(!is_valid_btc_address("1A1zP1"));
        assert!(!is_valid_btc_address(&format!("1{}", "z".repeat(40))));
        assert!(!is_valid_btc_address(""));
    }

    #[test]
    fn test_rejects_excluded_characters() {
        // 'O' and 'l' are not in the base58 alphabet
        assert!(!is_valid_btc_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfOl"));
        assert!(!is_valid_btc_address("1A1zP1eP5QGefi2DMPTfTL5SLmv7Div 0a"));
    }
}
