//! Symbol normalisation.
//!
//! Binance spot symbols are concatenated upper-case pairs (`BTCUSDT`). User
//! input is trimmed and upper-cased before it is sent anywhere.

use crate::error::OrderValidationError;

/// Longest symbol Binance currently lists is well under this.
pub const MAX_SYMBOL_LEN: usize = 20;

/// Trim and upper-case a user-supplied symbol, rejecting anything that cannot
/// be a Binance spot symbol.
pub fn normalize_symbol(raw: &str) -> Result<String, OrderValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(OrderValidationError::EmptySymbol);
    }
    if s.len() > MAX_SYMBOL_LEN || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(OrderValidationError::InvalidSymbol(s.to_string()));
    }
    Ok(s.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_cases_and_trims() {
        assert_eq!(normalize_symbol("  btcusdt ").unwrap(), "BTCUSDT");
        assert_eq!(normalize_symbol("1000PEPEUSDT").unwrap(), "1000PEPEUSDT");
    }

    #[test]
    fn empty_symbol() {
        assert_eq!(normalize_symbol("   "), Err(OrderValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_separators() {
        assert!(matches!(
            normalize_symbol("BTC/USDT"),
            Err(OrderValidationError::InvalidSymbol(_))
        ));
        assert!(matches!(
            normalize_symbol("BTC USDT"),
            Err(OrderValidationError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn rejects_overlong() {
        let sym = "A".repeat(MAX_SYMBOL_LEN + 1);
        assert!(normalize_symbol(&sym).is_err());
    }
}
