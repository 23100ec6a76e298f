use super::ToolOutput;
use crate::error::ToolResult;
use hyperliquid_sdk::{format_optional, format_usd, ExchangeClient, Position};

pub async fn get_positions(client: &ExchangeClient) -> ToolOutput {
    ToolOutput::from_result("Error fetching positions", render(client).await)
}

async fn render(client: &ExchangeClient) -> ToolResult<String> {
    let state = client.get_user_state().await?;
    let positions = state.open_positions();

    if positions.is_empty() {
        return Ok("No open positions".to_string());
    }

    let body = positions
        .iter()
        .map(|position| format_position(position))
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(format!(
        "**Current Positions ({})**\n\n{}",
        positions.len(),
        body
    ))
}

fn format_position(position: &Position) -> String {
    let leverage = position
        .leverage
        .as_ref()
        .map(|l| format!("{}x ({})", l.value, l.mode))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "**{}**\n  Size: {}\n  Entry Price: ${}\n  Unrealized PnL: ${}\n  ROE: {}\n  Leverage: {}\n  Liquidation Price: {}\n  Margin Used: ${}",
        position.coin,
        position.szi.normalize(),
        format_optional(position.entry_px),
        format_usd(position.unrealized_pnl),
        position.return_on_equity.normalize(),
        leverage,
        format_optional(position.liquidation_px),
        format_usd(position.margin_used),
    )
}
