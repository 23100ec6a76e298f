use super::{args, ToolOutput};
use crate::error::{ToolError, ToolResult};
use hyperliquid_sdk::{round_price, ExchangeClient, OrderRequest, OrderType, Tif};
use rmcp::model::JsonObject;
use rust_decimal::Decimal;
use tracing::debug;

pub async fn create_order(client: &ExchangeClient, args: &JsonObject) -> ToolOutput {
    ToolOutput::from_result("Error creating order", run(client, args).await)
}

/// Price `mid` with slippage toward the taker: up for buys, down for sells
///
/// Returns `None` when the slipped price does not fit in a `Decimal`.
///
/// # Example
/// ```
/// use mcp_hyperliquid::tools::create_order::slipped_price;
/// use rust_decimal::Decimal;
/// let mid = Decimal::from(100);
/// let slippage = Decimal::new(5, 2);
/// assert_eq!(slipped_price(mid, true, slippage), Some(Decimal::new(10500, 2)));
/// assert_eq!(slipped_price(mid, false, slippage), Some(Decimal::new(9500, 2)));
/// assert_eq!(slipped_price(Decimal::MAX, true, slippage), None);
/// ```
pub fn slipped_price(mid: Decimal, is_buy: bool, slippage: Decimal) -> Option<Decimal> {
    let factor = if is_buy {
        Decimal::ONE + slippage
    } else {
        Decimal::ONE - slippage
    };
    mid.checked_mul(factor).map(|price| round_price(price, 2))
}

/// [`slipped_price`] as a tool argument error on overflow
pub(crate) fn slipped_limit(mid: Decimal, is_buy: bool, slippage: Decimal) -> ToolResult<Decimal> {
    slipped_price(mid, is_buy, slippage).ok_or_else(|| ToolError::invalid("Price out of range"))
}

async fn run(client: &ExchangeClient, args: &JsonObject) -> ToolResult<String> {
    let coin = args::coin(args)?;
    let is_buy = args::required_bool(args, "is_buy")?;
    let size = args::positive_decimal(args, "size", "Size")?;
    let price = args::optional_decimal(args, "price")?;
    let reduce_only = args::optional_bool(args, "reduce_only", false)?;
    let slippage = args::slippage(args)?;

    let (limit_px, tif, is_market) = match price {
        Some(price) => {
            args::ensure_positive(price, "Price")?;
            let tif = args::optional_parsed::<Tif>(args, "order_type")?;
            (price, tif.unwrap_or_default(), false)
        }
        None => {
            let mids = client.get_all_mids().await?;
            let mid = mids
                .get(&coin)
                .copied()
                .filter(|mid| !mid.is_zero())
                .ok_or_else(|| ToolError::Unavailable(format!("Cannot get market price for {}", coin)))?;
            debug!("Market order on {} from mid {}", coin, mid);
            // Market orders are always Ioc, whatever order_type says
            (slipped_limit(mid, is_buy, slippage)?, Tif::Ioc, true)
        }
    };

    let status = client
        .place_order(OrderRequest {
            coin: coin.clone(),
            is_buy,
            size,
            limit_px,
            order_type: OrderType::limit(tif),
            reduce_only,
        })
        .await?;

    let (type_text, price_text) = if is_market {
        ("MARKET".to_string(), format!("{:.2} (with slippage)", limit_px))
    } else {
        (format!("LIMIT ({})", tif), limit_px.normalize().to_string())
    };

    Ok(format!(
        "✅ Order created successfully\n\n**Details:**\n  Coin: {}\n  Side: {}\n  Size: {}\n  Type: {}\n  Price: ${}\n  Reduce Only: {}\n\nStatus: {}",
        coin,
        if is_buy { "BUY" } else { "SELL" },
        size.normalize(),
        type_text,
        price_text,
        if reduce_only { "Yes" } else { "No" },
        status,
    ))
}
