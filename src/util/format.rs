//! Number formatting for balances and USD values.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Smallest balance shown as a number; anything below renders as `< 0.0001`.
const DUST_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Format a decimal balance string for display.
///
/// Zero renders as `"0"`, dust as `"< 0.0001"`, everything else with
/// exactly `decimals` places. Unparseable input is returned unchanged.
#[must_use]
pub fn format_balance(balance: &str, decimals: u32) -> String {
    let Ok(value) = Decimal::from_str(balance.trim()) else {
        return balance.to_string();
    };
    if value.is_zero() {
        return "0".to_string();
    }
    if value < DUST_THRESHOLD {
        return "< 0.0001".to_string();
    }
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.prec$}", prec = decimals as usize)
}

/// Format a USD value string as `$1,234.56`.
///
/// Unparseable input renders as `$0.00`.
#[must_use]
pub fn format_usd(value: &str) -> String {
    let parsed = Decimal::from_str(value.trim()).unwrap_or(Decimal::ZERO);
    let rounded = parsed.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with one decimal place.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Shorten an address to `0x742d…f44e` for narrow tables.
#[must_use]
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_zero_and_dust() {
        assert_eq!(format_balance("0", 4), "0");
        assert_eq!(format_balance("0.000", 4), "0");
        assert_eq!(format_balance("0.00009", 4), "< 0.0001");
    }

    #[test]
    fn balance_fixed_places() {
        assert_eq!(format_balance("1.5", 4), "1.5000");
        assert_eq!(format_balance("0.0001", 4), "0.0001");
        assert_eq!(format_balance("2.123456", 2), "2.12");
        assert_eq!(format_balance("not a number", 4), "not a number");
    }

    #[test]
    fn usd_grouping() {
        assert_eq!(format_usd("0"), "$0.00");
        assert_eq!(format_usd("12.5"), "$12.50");
        assert_eq!(format_usd("1234.56"), "$1,234.56");
        assert_eq!(format_usd("1234567.891"), "$1,234,567.89");
        assert_eq!(format_usd("999"), "$999.00");
        assert_eq!(format_usd("-1000"), "-$1,000.00");
        assert_eq!(format_usd("garbage"), "$0.00");
    }

    #[test]
    fn address_truncation() {
        assert_eq!(
            truncate_address("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"),
            "0x742d…f44e"
        );
        assert_eq!(truncate_address("short"), "short");
    }

    #[test]
    fn percent_one_place() {
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
