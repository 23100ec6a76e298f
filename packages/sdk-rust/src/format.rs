//! Formatting utilities for wire values and display text

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal string as the exchange expects it: no trailing zeros, no exponent
///
/// # Example
/// ```
/// use hyperliquid_sdk::to_wire;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// assert_eq!(to_wire(Decimal::from_str("105.00").unwrap()), "105");
/// assert_eq!(to_wire(Decimal::from_str("0.0100").unwrap()), "0.01");
/// ```
pub fn to_wire(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Round to `dp` decimal places, halves away from zero
pub fn round_price(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a dollar amount with commas and exactly two decimals
///
/// # Example
/// ```
/// use hyperliquid_sdk::format_usd;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// assert_eq!(format_usd(Decimal::from_str("1234567.891").unwrap()), "1,234,567.89");
/// assert_eq!(format_usd(Decimal::from_str("-38500").unwrap()), "-38,500.00");
/// ```
pub fn format_usd(value: Decimal) -> String {
    let formatted = format!("{:.2}", round_price(value, 2));
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };

    let mut parts = unsigned.splitn(2, '.');
    let integer = parts.next().unwrap_or("0");
    let decimal = parts.next().unwrap_or("00");

    format!("{}{}.{}", sign, add_commas(integer), decimal)
}

/// Normalized decimal for display, or `N/A` when absent
pub fn format_optional(value: Option<Decimal>) -> String {
    value
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Epoch milliseconds as `YYYY-MM-DD HH:MM:SS UTC`
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// Add commas to an integer string
fn add_commas(s: &str) -> String {
    let digits: Vec<char> = s.chars().collect();
    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.iter().enumerate() {
        result.push(*c);
        let pos = len - i - 1;
        if pos > 0 && pos % 3 == 0 {
            result.push(',');
        }
    }

    result
}
