//! Wallet address format check.

use lazy_regex::regex_is_match;

/// Returns `true` if `address` is `0x` followed by exactly 40 hex digits.
///
/// Only the surface format is checked: no EIP-55 checksum, no on-chain lookup.
/// The match is anchored, so callers are expected to trim user input first.
///
/// # Examples
///
/// ```
/// use referral_bot::address::is_valid_address;
///
/// assert!(is_valid_address("0xb5e9541143c137b19286990223c0a140137c5f18"));
/// assert!(!is_valid_address("0x123"));
/// ```
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    regex_is_match!(r"^0x[a-fA-F0-9]{40}$", address)
}
