use super::{args, ToolOutput};
use crate::error::ToolResult;
use hyperliquid_sdk::{format_optional, format_usd, ExchangeClient, SdkError};
use rmcp::model::JsonObject;

pub async fn get_market_data(client: &ExchangeClient, args: &JsonObject) -> ToolOutput {
    ToolOutput::from_result("Error fetching market data", render(client, args).await)
}

async fn render(client: &ExchangeClient, args: &JsonObject) -> ToolResult<String> {
    let coin = args::coin(args)?;

    let (market, mids) = tokio::try_join!(client.get_meta_and_asset_ctxs(), client.get_all_mids())?;

    let (meta, ctx) = market
        .asset(&coin)
        .ok_or_else(|| SdkError::AssetNotFound(coin.clone()))?;
    let ctx = ctx.cloned().unwrap_or_default();

    let volume = ctx
        .day_ntl_vlm
        .map(format_usd)
        .unwrap_or_else(|| "N/A".to_string());
    let max_leverage = meta
        .max_leverage
        .map(|l| format!("{}x", l))
        .unwrap_or_else(|| "N/A".to_string());

    let lines = [
        format!("**Market Data for {}**", coin),
        String::new(),
        "**Price Information:**".to_string(),
        format!("  Current Mid Price: ${}", format_optional(mids.get(&coin).copied())),
        format!("  Mark Price: ${}", format_optional(ctx.mark_px)),
        format!("  Oracle Price: ${}", format_optional(ctx.oracle_px)),
        format!("  Previous Day Price: ${}", format_optional(ctx.prev_day_px)),
        String::new(),
        "**Asset Details:**".to_string(),
        format!("  Name: {}", meta.name),
        format!("  Size Decimals: {}", meta.sz_decimals),
        format!("  Max Leverage: {}", max_leverage),
        format!("  Only Isolated: {}", meta.only_isolated),
        String::new(),
        "**Market Stats:**".to_string(),
        format!("  24h Volume: ${}", volume),
        format!("  Open Interest: {}", format_optional(ctx.open_interest)),
        format!("  Funding Rate: {}", format_optional(ctx.funding)),
        format!("  Premium: {}", format_optional(ctx.premium)),
    ];

    Ok(lines.join("\n"))
}
