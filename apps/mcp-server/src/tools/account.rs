use super::ToolOutput;
use super::orders::order_type_tag;
use crate::error::ToolResult;
use hyperliquid_sdk::{format_optional, format_usd, ExchangeClient};

pub async fn get_account_info(client: &ExchangeClient) -> ToolOutput {
    ToolOutput::from_result("Error fetching account information", render(client).await)
}

async fn render(client: &ExchangeClient) -> ToolResult<String> {
    let (state, orders) = tokio::try_join!(client.get_user_state(), client.get_open_orders())?;

    let summary = &state.cross_margin_summary;
    let positions = state.open_positions();

    let mut lines = vec![
        "**Account Information**".to_string(),
        String::new(),
        format!("**Wallet Address:** {}", client.wallet_address()),
        format!("**Network:** {}", client.network()),
        String::new(),
        "**Balances:**".to_string(),
        format!("  Account Value: ${}", format_usd(summary.account_value)),
        format!("  Total Raw USD: ${}", format_usd(summary.total_raw_usd)),
        format!("  Total Margin Used: ${}", format_usd(summary.total_margin_used)),
        format!("  Withdrawable: ${}", format_usd(state.withdrawable)),
        String::new(),
        format!("**Current Positions ({}):**", positions.len()),
    ];

    if positions.is_empty() {
        lines.push("  No open positions".to_string());
    }
    for position in &positions {
        lines.push(format!(
            "  • {}: {} @ ${}",
            position.coin,
            position.szi.normalize(),
            format_optional(position.entry_px)
        ));
        lines.push(format!(
            "    Unrealized PnL: ${}",
            format_usd(position.unrealized_pnl)
        ));
        lines.push(format!("    Margin Used: ${}", format_usd(position.margin_used)));
    }

    lines.push(String::new());
    lines.push(format!("**Pending Orders ({}):**", orders.len()));

    if orders.is_empty() {
        lines.push("  No pending orders".to_string());
    }
    for order in &orders {
        lines.push(format!(
            "  • {} {}: {} @ ${}",
            order.coin,
            order.side,
            order.sz.normalize(),
            order.limit_px.normalize()
        ));
        lines.push(format!(
            "    Order ID: {} | Type: {}",
            order.oid,
            order_type_tag(order)
        ));
    }

    Ok(lines.join("\n"))
}
