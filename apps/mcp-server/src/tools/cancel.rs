use super::{args, ToolOutput};
use crate::error::ToolResult;
use hyperliquid_sdk::{CancelRequest, ExchangeClient};
use rmcp::model::JsonObject;

/// Cancel one order, or every open order for the coin when `order_id` is omitted
pub async fn cancel_order(client: &ExchangeClient, args: &JsonObject) -> ToolOutput {
    ToolOutput::from_result("Error cancelling order(s)", run_cancel(client, args).await)
}

pub async fn cancel_all_orders(client: &ExchangeClient) -> ToolOutput {
    let result = client
        .cancel_all_orders(None)
        .await
        .map(|cancelled| match cancelled {
            0 => "No open orders to cancel".to_string(),
            n => format!("✅ Cancelled {} order(s) successfully", n),
        })
        .map_err(Into::into);

    ToolOutput::from_result("Error cancelling all orders", result)
}

async fn run_cancel(client: &ExchangeClient, args: &JsonObject) -> ToolResult<String> {
    let coin = args::coin(args)?;

    if let Some(oid) = args::optional_u64(args, "order_id")? {
        client
            .cancel_order(CancelRequest {
                coin: coin.clone(),
                oid,
            })
            .await?;

        return Ok(format!(
            "✅ Order cancelled successfully\n\n**Details:**\n  Coin: {}\n  Order ID: {}",
            coin, oid
        ));
    }

    match client.cancel_all_orders(Some(&coin)).await? {
        0 => Ok(format!("No open orders found for {}", coin)),
        n => Ok(format!("✅ Cancelled {} order(s) for {} successfully", n, coin)),
    }
}
