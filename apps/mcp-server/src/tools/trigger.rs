use super::create_order::slipped_limit;
use super::{args, ToolOutput};
use crate::error::{ToolError, ToolResult};
use hyperliquid_sdk::{ExchangeClient, OrderRequest, OrderType, TpSl};
use rmcp::model::JsonObject;

/// Take-profit / stop-loss order that rests until the mark crosses `trigger_price`
pub async fn create_trigger_order(client: &ExchangeClient, args: &JsonObject) -> ToolOutput {
    ToolOutput::from_result("Error creating trigger order", run(client, args).await)
}

async fn run(client: &ExchangeClient, args: &JsonObject) -> ToolResult<String> {
    let coin = args::coin(args)?;
    let is_buy = args::required_bool(args, "is_buy")?;
    let size = args::positive_decimal(args, "size", "Size")?;
    let trigger_px = args::positive_decimal(args, "trigger_price", "Trigger price")?;
    let tpsl = args::optional_parsed::<TpSl>(args, "tpsl")?
        .ok_or_else(|| ToolError::invalid("tpsl is required (tp or sl)"))?;
    let price = args::optional_decimal(args, "price")?;
    let reduce_only = args::optional_bool(args, "reduce_only", true)?;
    let slippage = args::slippage(args)?;

    // Market triggers still carry a limit price that bounds the fill
    let (limit_px, is_market) = match price {
        Some(price) => {
            args::ensure_positive(price, "Price")?;
            (price, false)
        }
        None => (slipped_limit(trigger_px, is_buy, slippage)?, true),
    };

    let order_type = OrderType::Trigger {
        trigger_px,
        is_market,
        tpsl,
    };

    let status = client
        .place_order(OrderRequest {
            coin: coin.clone(),
            is_buy,
            size,
            limit_px,
            order_type,
            reduce_only,
        })
        .await?;

    Ok(format!(
        "✅ Trigger order created successfully\n\n**Details:**\n  Coin: {}\n  Side: {}\n  Size: {}\n  Type: {}\n  Limit Price: ${}\n  Reduce Only: {}\n\nStatus: {}",
        coin,
        if is_buy { "BUY" } else { "SELL" },
        size.normalize(),
        order_type,
        limit_px.normalize(),
        if reduce_only { "Yes" } else { "No" },
        status,
    ))
}
