//! Decimal conversions between smallest chain units, display units and USD.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, WalletError};

/// Convert a smallest-unit integer (wei, satoshi, lamports) to display units.
///
/// # Errors
///
/// Returns `ParseResponse` when the amount does not fit a 96-bit decimal.
pub fn from_smallest_units(raw: u128, decimals: u32) -> Result<Decimal> {
    let signed = i128::try_from(raw)
        .map_err(|_| WalletError::ParseResponse(format!("amount {raw} out of range")))?;
    Decimal::try_from_i128_with_scale(signed, decimals)
        .map(|d| d.normalize())
        .map_err(|e| WalletError::ParseResponse(format!("amount {raw} out of range: {e}")))
}

/// Parse a `0x`-prefixed hex quantity as returned by JSON-RPC nodes.
///
/// # Errors
///
/// Returns `ParseResponse` for a missing prefix, empty digits, or overflow.
pub fn parse_hex_quantity(hex: &str) -> Result<u128> {
    let digits = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .ok_or_else(|| WalletError::ParseResponse(format!("expected hex quantity, got {hex:?}")))?;
    if digits.is_empty() {
        return Err(WalletError::ParseResponse("empty hex quantity".to_string()));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| WalletError::ParseResponse(format!("bad hex quantity {hex:?}: {e}")))
}

/// Convert an upstream USD unit price to a decimal.
///
/// # Errors
///
/// Returns `ParseResponse` for negative or non-finite prices.
pub fn price_from_f64(price: f64) -> Result<Decimal> {
    if !price.is_finite() || price < 0.0 {
        return Err(WalletError::ParseResponse(format!("invalid price {price}")));
    }
    Decimal::from_f64(price)
        .ok_or_else(|| WalletError::ParseResponse(format!("invalid price {price}")))
}

/// Render a display-unit balance without trailing zeros.
#[must_use]
pub fn format_balance(balance: Decimal) -> String {
    balance.normalize().to_string()
}

/// `balance * unit_price`, rounded half away from zero to 2 decimal places.
///
/// # Errors
///
/// Returns `ParseResponse` if the product overflows.
pub fn usd_value(balance: Decimal, unit_price: Decimal) -> Result<String> {
    let product = balance
        .checked_mul(unit_price)
        .ok_or_else(|| WalletError::ParseResponse("usd value overflow".to_string()))?;
    let rounded = product.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{rounded:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wei_to_ether() {
        let one_eth = from_smallest_units(1_000_000_000_000_000_000, 18).unwrap();
        assert_eq!(format_balance(one_eth), "1");

        let half = from_smallest_units(500_000_000_000_000_000, 18).unwrap();
        assert_eq!(format_balance(half), "0.5");
    }

    #[test]
    fn satoshi_to_btc() {
        let sats = from_smallest_units(12_345_678, 8).unwrap();
        assert_eq!(format_balance(sats), "0.12345678");
        assert_eq!(format_balance(from_smallest_units(0, 8).unwrap()), "0");
    }

    #[test]
    fn oversized_amount_is_rejected() {
        assert!(from_smallest_units(u128::MAX, 18).is_err());
    }

    #[test]
    fn hex_quantities() {
        assert_eq!(parse_hex_quantity("0x0").unwrap(), 0);
        assert_eq!(
            parse_hex_quantity("0x1bc16d674ec80000").unwrap(),
            2_000_000_000_000_000_000
        );
        assert!(parse_hex_quantity("1bc1").is_err());
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xzz").is_err());
    }

    #[test]
    fn usd_value_rounds_to_cents() {
        let balance = Decimal::from_str("1.5").unwrap();
        let price = Decimal::from_str("3000.005").unwrap();
        assert_eq!(usd_value(balance, price).unwrap(), "4500.01");

        let zero = usd_value(Decimal::ZERO, price).unwrap();
        assert_eq!(zero, "0.00");

        let whole = usd_value(Decimal::from(2), Decimal::from(3)).unwrap();
        assert_eq!(whole, "6.00");
    }

    #[test]
    fn prices_must_be_finite_and_positive() {
        assert!(price_from_f64(f64::NAN).is_err());
        assert!(price_from_f64(-1.0).is_err());
        assert_eq!(price_from_f64(0.25).unwrap(), Decimal::from_str("0.25").unwrap());
    }
}
