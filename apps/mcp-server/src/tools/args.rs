//! Typed access to raw tool-call arguments
//!
//! Missing keys and explicit `null`s both count as absent.

use crate::error::{ToolError, ToolResult};
use rmcp::model::JsonObject;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Default market-order slippage (5%)
pub const DEFAULT_SLIPPAGE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

fn get<'a>(args: &'a JsonObject, key: &str) -> Option<&'a Value> {
    args.get(key).filter(|value| !value.is_null())
}

/// Non-empty coin symbol under `coin`, trimmed
pub fn coin(args: &JsonObject) -> ToolResult<String> {
    match get(args, "coin").and_then(Value::as_str) {
        Some(coin) if !coin.trim().is_empty() => Ok(coin.trim().to_string()),
        _ => Err(ToolError::invalid("Invalid coin symbol")),
    }
}

pub fn required_bool(args: &JsonObject, key: &str) -> ToolResult<bool> {
    get(args, key)
        .and_then(Value::as_bool)
        .ok_or_else(|| ToolError::invalid(format!("{} must be a boolean", key)))
}

pub fn optional_bool(args: &JsonObject, key: &str, default: bool) -> ToolResult<bool> {
    match get(args, key) {
        None => Ok(default),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| ToolError::invalid(format!("{} must be a boolean", key))),
    }
}

/// Decimal from a JSON number or a numeric string
pub fn optional_decimal(args: &JsonObject, key: &str) -> ToolResult<Option<Decimal>> {
    let Some(value) = get(args, key) else {
        return Ok(None);
    };

    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| ToolError::invalid(format!("{} must be a number", key)))
}

pub fn required_decimal(args: &JsonObject, key: &str) -> ToolResult<Decimal> {
    optional_decimal(args, key)?
        .ok_or_else(|| ToolError::invalid(format!("{} is required", key)))
}

/// Like [`required_decimal`] but rejects zero and negatives
pub fn positive_decimal(args: &JsonObject, key: &str, label: &str) -> ToolResult<Decimal> {
    let value = required_decimal(args, key)?;
    ensure_positive(value, label)?;
    Ok(value)
}

pub fn ensure_positive(value: Decimal, label: &str) -> ToolResult<()> {
    if value <= Decimal::ZERO {
        return Err(ToolError::invalid(format!("{} must be greater than 0", label)));
    }
    Ok(())
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Non-negative integer id
pub fn optional_u64(args: &JsonObject, key: &str) -> ToolResult<Option<u64>> {
    match get(args, key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| ToolError::invalid(format!("Invalid {}", key))),
    }
}

pub fn required_u64(args: &JsonObject, key: &str) -> ToolResult<u64> {
    optional_u64(args, key)?.ok_or_else(|| ToolError::invalid(format!("{} is required", key)))
}

/// String argument parsed through `FromStr`
pub fn optional_parsed<T>(args: &JsonObject, key: &str) -> ToolResult<Option<T>>
where
    T: FromStr<Err = String>,
{
    match get(args, key) {
        None => Ok(None),
        Some(Value::String(s)) => s.parse().map(Some).map_err(ToolError::InvalidArgument),
        Some(_) => Err(ToolError::invalid(format!("{} must be a string", key))),
    }
}

/// Slippage fraction in `[0, 1)`, default [`DEFAULT_SLIPPAGE`]
pub fn slippage(args: &JsonObject) -> ToolResult<Decimal> {
    let slippage = optional_decimal(args, "slippage")?.unwrap_or(DEFAULT_SLIPPAGE);
    if slippage < Decimal::ZERO || slippage >= Decimal::ONE {
        return Err(ToolError::invalid(format!(
            "Slippage must be between 0 and 1, got {}",
            slippage
        )));
    }
    Ok(slippage)
}
