use super::{args, ToolOutput};
use crate::error::ToolResult;
use hyperliquid_sdk::{ExchangeClient, ModifyRequest, OrderType, Tif};
use rmcp::model::JsonObject;

pub async fn modify_order(client: &ExchangeClient, args: &JsonObject) -> ToolOutput {
    ToolOutput::from_result("Error modifying order", run(client, args).await)
}

async fn run(client: &ExchangeClient, args: &JsonObject) -> ToolResult<String> {
    let coin = args::coin(args)?;
    let oid = args::required_u64(args, "order_id")?;
    let limit_px = args::positive_decimal(args, "price", "Price")?;
    let size = args::positive_decimal(args, "size", "Size")?;
    let tif = args::optional_parsed::<Tif>(args, "order_type")?.unwrap_or_default();
    let reduce_only = args::optional_bool(args, "reduce_only", false)?;

    client
        .modify_order(ModifyRequest {
            coin: coin.clone(),
            oid,
            size,
            limit_px,
            order_type: OrderType::limit(tif),
            reduce_only,
        })
        .await?;

    Ok(format!(
        "✅ Order modified successfully\n\n**Details:**\n  Coin: {}\n  Order ID: {}\n  Size: {}\n  Price: ${}\n  Type: LIMIT ({})\n  Reduce Only: {}",
        coin,
        oid,
        size.normalize(),
        limit_px.normalize(),
        tif,
        if reduce_only { "Yes" } else { "No" },
    ))
}
