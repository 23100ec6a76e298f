//! Tool handlers
//!
//! Each handler validates its raw arguments, calls the exchange client and
//! renders the outcome as text. Handlers never fail: errors come back as a
//! flagged [`ToolOutput`].

pub mod account;
pub mod args;
pub mod cancel;
pub mod create_order;
pub mod market;
pub mod modify;
pub mod orders;
pub mod positions;
pub mod trigger;

use crate::error::ToolResult;
use hyperliquid_sdk::ExchangeClient;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Text result of one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    /// Render a handler result, prefixing failures with `context`
    pub fn from_result(context: &str, result: ToolResult<String>) -> Self {
        match result {
            Ok(text) => Self::success(text),
            Err(e) => {
                warn!("{}: {}", context, e);
                Self::error(format!("❌ {}: {}", context, e))
            }
        }
    }
}

impl From<ToolOutput> for CallToolResult {
    fn from(output: ToolOutput) -> Self {
        let content = vec![Content::text(output.text)];
        if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// Route a call to its handler by tool name
pub async fn dispatch(client: &ExchangeClient, name: &str, args: &JsonObject) -> ToolOutput {
    info!("🔧 Tool call: {}", name);

    match name {
        "get_positions" => positions::get_positions(client).await,
        "get_orders" => orders::get_orders(client).await,
        "create_order" => create_order::create_order(client, args).await,
        "cancel_order" => cancel::cancel_order(client, args).await,
        "cancel_all_orders" => cancel::cancel_all_orders(client).await,
        "get_account_info" => account::get_account_info(client).await,
        "get_market_data" => market::get_market_data(client, args).await,
        "modify_order" => modify::modify_order(client, args).await,
        "create_trigger_order" => trigger::create_trigger_order(client, args).await,
        other => {
            warn!("Unknown tool requested: {}", other);
            ToolOutput::error(format!("Unknown tool: {}", other))
        }
    }
}

fn schema(value: Value) -> Arc<JsonObject> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

fn no_args() -> Arc<JsonObject> {
    schema(json!({ "type": "object", "properties": {} }))
}

const COIN_DESCRIPTION: &str = "Trading pair symbol (e.g., BTC, ETH)";

/// Every tool this server exposes, with its input schema
pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "get_positions",
            "Get all current open positions on Hyperliquid",
            no_args(),
        ),
        Tool::new("get_orders", "Get all open orders on Hyperliquid", no_args()),
        Tool::new(
            "create_order",
            "Create a new order on Hyperliquid. Omit price for a market order. \
             To close a position, create an order on the opposite side with the position's size.",
            schema(json!({
                "type": "object",
                "properties": {
                    "coin": { "type": "string", "description": COIN_DESCRIPTION },
                    "is_buy": { "type": "boolean", "description": "True for buy order, false for sell order" },
                    "size": { "type": "number", "description": "Order size/quantity", "exclusiveMinimum": 0 },
                    "price": {
                        "type": "number",
                        "description": "Limit price for the order. Only use a price the user gave; omit for a market order.",
                        "exclusiveMinimum": 0
                    },
                    "order_type": {
                        "type": "string",
                        "enum": ["Gtc", "Ioc", "Alo"],
                        "description": "Gtc (good til canceled), Ioc (immediate or cancel), Alo (add liquidity only). Market orders always use Ioc.",
                        "default": "Gtc"
                    },
                    "reduce_only": { "type": "boolean", "description": "Whether this is a reduce-only order", "default": false },
                    "slippage": {
                        "type": "number",
                        "description": "Slippage tolerance for market orders (e.g., 0.01 for 1%)",
                        "default": 0.05,
                        "minimum": 0,
                        "exclusiveMaximum": 1
                    }
                },
                "required": ["coin", "is_buy", "size"]
            })),
        ),
        Tool::new(
            "cancel_order",
            "Cancel order(s) on Hyperliquid. With order_id, cancels that order; \
             without it, cancels every open order for the coin.",
            schema(json!({
                "type": "object",
                "properties": {
                    "coin": { "type": "string", "description": COIN_DESCRIPTION },
                    "order_id": {
                        "type": "integer",
                        "description": "Order ID to cancel. If not provided, all orders for this coin will be cancelled.",
                        "minimum": 0
                    }
                },
                "required": ["coin"]
            })),
        ),
        Tool::new("cancel_all_orders", "Cancel all open orders", no_args()),
        Tool::new(
            "get_account_info",
            "Get wallet address, balances, positions and pending orders",
            no_args(),
        ),
        Tool::new(
            "get_market_data",
            "Get price, volume, open interest and funding for one asset",
            schema(json!({
                "type": "object",
                "properties": {
                    "coin": { "type": "string", "description": COIN_DESCRIPTION }
                },
                "required": ["coin"]
            })),
        ),
        Tool::new(
            "modify_order",
            "Change the price, size or time in force of a resting order. The side is kept.",
            schema(json!({
                "type": "object",
                "properties": {
                    "coin": { "type": "string", "description": COIN_DESCRIPTION },
                    "order_id": { "type": "integer", "description": "Order ID to modify", "minimum": 0 },
                    "price": { "type": "number", "description": "New limit price", "exclusiveMinimum": 0 },
                    "size": { "type": "number", "description": "New order size", "exclusiveMinimum": 0 },
                    "order_type": { "type": "string", "enum": ["Gtc", "Ioc", "Alo"], "default": "Gtc" },
                    "reduce_only": { "type": "boolean", "default": false }
                },
                "required": ["coin", "order_id", "price", "size"]
            })),
        ),
        Tool::new(
            "create_trigger_order",
            "Create a take-profit or stop-loss order that fires at trigger_price. \
             Omit price to execute at market when triggered.",
            schema(json!({
                "type": "object",
                "properties": {
                    "coin": { "type": "string", "description": COIN_DESCRIPTION },
                    "is_buy": { "type": "boolean", "description": "Side of the order placed on trigger" },
                    "size": { "type": "number", "exclusiveMinimum": 0 },
                    "trigger_price": { "type": "number", "description": "Mark price that activates the order", "exclusiveMinimum": 0 },
                    "tpsl": { "type": "string", "enum": ["tp", "sl"], "description": "tp for take profit, sl for stop loss" },
                    "price": { "type": "number", "description": "Limit price once triggered; omit for market", "exclusiveMinimum": 0 },
                    "reduce_only": { "type": "boolean", "default": true },
                    "slippage": { "type": "number", "default": 0.05, "minimum": 0, "exclusiveMaximum": 1 }
                },
                "required": ["coin", "is_buy", "size", "trigger_price", "tpsl"]
            })),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_definitions_cover_dispatch() {
        let names: HashSet<String> = definitions().iter().map(|t| t.name.to_string()).collect();
        for name in [
            "get_positions",
            "get_orders",
            "create_order",
            "cancel_order",
            "cancel_all_orders",
            "get_account_info",
            "get_market_data",
            "modify_order",
            "create_trigger_order",
        ] {
            assert!(names.contains(name), "missing tool {}", name);
        }
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_create_order_schema() {
        let tools = definitions();
        let tool = tools.iter().find(|t| t.name == "create_order").unwrap();
        assert_eq!(tool.input_schema["required"], json!(["coin", "is_buy", "size"]));
        assert_eq!(
            tool.input_schema["properties"]["order_type"]["enum"],
            json!(["Gtc", "Ioc", "Alo"])
        );
        assert_eq!(tool.input_schema["properties"]["slippage"]["default"], json!(0.05));
    }

    #[test]
    fn test_output_into_call_tool_result() {
        let result: CallToolResult = ToolOutput::error("boom").into();
        assert_eq!(result.is_error, Some(true));

        let result: CallToolResult = ToolOutput::success("fine").into();
        assert_ne!(result.is_error, Some(true));
    }
}
