//! Currency classification.
//!
//! The cashier only tracks crypto transactions, so the store needs to tell a
//! crypto account currency from a fiat one before it talks to the server.

/// Crypto currency codes known to the cashier.
///
/// Hosts that receive the list from their backend should pass it through
/// `StoreConfig::crypto_currencies` instead.
pub const DEFAULT_CRYPTO_CURRENCIES: &[&str] = &[
    "BTC", "BUSD", "DAI", "ETH", "EURS", "eUSDT", "IDK", "LTC", "PAX", "TUSD", "tUSDT", "USB",
    "USDC", "USDK", "UST",
];

/// Whether `code` is one of the default crypto currency codes.
///
/// Comparison ignores ASCII case (`"btc"` matches `"BTC"`).
pub fn is_cryptocurrency(code: &str) -> bool {
    is_listed(code, DEFAULT_CRYPTO_CURRENCIES.iter().copied())
}

pub(crate) fn is_listed<'a>(code: &str, list: impl IntoIterator<Item = &'a str>) -> bool {
    let code = code.trim();
    !code.is_empty() && list.into_iter().any(|c| c.eq_ignore_ascii_case(code))
}
