use super::ToolOutput;
use crate::error::ToolResult;
use hyperliquid_sdk::{format_timestamp, ExchangeClient, OpenOrder};

pub async fn get_orders(client: &ExchangeClient) -> ToolOutput {
    ToolOutput::from_result("Error fetching orders", render(client).await)
}

async fn render(client: &ExchangeClient) -> ToolResult<String> {
    let orders = client.get_open_orders().await?;

    if orders.is_empty() {
        return Ok("No open orders".to_string());
    }

    let body = orders
        .iter()
        .map(format_order)
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!("**Open Orders ({})**\n\n{}", orders.len(), body))
}

pub(crate) fn order_type_tag(order: &OpenOrder) -> String {
    match (&order.order_type, &order.tif) {
        (Some(kind), Some(tif)) => format!("{} ({})", kind, tif),
        (Some(kind), None) => kind.clone(),
        (None, _) => "N/A".to_string(),
    }
}

fn format_order(order: &OpenOrder) -> String {
    let mut text = format!(
        "**Order ID: {}**\n  Coin: {}\n  Side: {}\n  Size: {}\n  Limit Price: ${}\n  Reduce Only: {}\n  Order Type: {}",
        order.oid,
        order.coin,
        order.side,
        order.sz.normalize(),
        order.limit_px.normalize(),
        if order.reduce_only { "Yes" } else { "No" },
        order_type_tag(order),
    );
    if order.is_trigger {
        if let Some(trigger_px) = order.trigger_px {
            text.push_str(&format!("\n  Trigger Price: ${}", trigger_px.normalize()));
        }
    }
    text.push_str(&format!("\n  Timestamp: {}", format_timestamp(order.timestamp)));
    text
}
