//! Typed requests and responses
//!
//! Info responses are parsed here at the client boundary so callers never
//! poke at untyped JSON. Numeric fields arrive as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===== Asset metadata =====

/// Perpetuals universe from `{"type": "meta"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub universe: Vec<AssetMeta>,
}

impl Meta {
    /// Position of `coin` in the universe; this is the exchange's asset id
    pub fn asset_index(&self, coin: &str) -> Option<u32> {
        self.universe
            .iter()
            .position(|asset| asset.name == coin)
            .map(|index| index as u32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub max_leverage: Option<u32>,
    #[serde(default)]
    pub only_isolated: bool,
    #[serde(default)]
    pub is_delisted: bool,
}

/// Market context for one asset, aligned by index with `Meta::universe`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCtx {
    #[serde(default)]
    pub funding: Option<Decimal>,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    #[serde(default)]
    pub prev_day_px: Option<Decimal>,
    #[serde(default)]
    pub day_ntl_vlm: Option<Decimal>,
    #[serde(default)]
    pub premium: Option<Decimal>,
    #[serde(default)]
    pub oracle_px: Option<Decimal>,
    #[serde(default)]
    pub mark_px: Option<Decimal>,
    #[serde(default)]
    pub mid_px: Option<Decimal>,
}

/// `{"type": "metaAndAssetCtxs"}` returns `[meta, [ctx, ...]]`
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "(Meta, Vec<AssetCtx>)")]
pub struct MetaAndAssetCtxs {
    pub meta: Meta,
    pub asset_ctxs: Vec<AssetCtx>,
}

impl From<(Meta, Vec<AssetCtx>)> for MetaAndAssetCtxs {
    fn from((meta, asset_ctxs): (Meta, Vec<AssetCtx>)) -> Self {
        Self { meta, asset_ctxs }
    }
}

impl MetaAndAssetCtxs {
    /// Metadata and context for `coin`, looked up by universe position
    pub fn asset(&self, coin: &str) -> Option<(&AssetMeta, Option<&AssetCtx>)> {
        let index = self.meta.asset_index(coin)? as usize;
        Some((&self.meta.universe[index], self.asset_ctxs.get(index)))
    }
}

// ===== Account state =====

/// `{"type": "clearinghouseState", "user": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
    #[serde(default)]
    pub margin_summary: MarginSummary,
    #[serde(default)]
    pub cross_margin_summary: MarginSummary,
    #[serde(default)]
    pub withdrawable: Decimal,
}

impl ClearinghouseState {
    /// Positions with a nonzero size
    pub fn open_positions(&self) -> Vec<&Position> {
        self.asset_positions
            .iter()
            .map(|p| &p.position)
            .filter(|p| !p.szi.is_zero())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    #[serde(default)]
    pub account_value: Decimal,
    #[serde(default)]
    pub total_ntl_pos: Decimal,
    #[serde(default)]
    pub total_raw_usd: Decimal,
    #[serde(default)]
    pub total_margin_used: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPosition {
    pub position: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub coin: String,
    /// Signed size: positive long, negative short
    pub szi: Decimal,
    #[serde(default)]
    pub entry_px: Option<Decimal>,
    #[serde(default)]
    pub position_value: Decimal,
    #[serde(default)]
    pub unrealized_pnl: Decimal,
    #[serde(default)]
    pub return_on_equity: Decimal,
    #[serde(default)]
    pub liquidation_px: Option<Decimal>,
    #[serde(default)]
    pub margin_used: Decimal,
    #[serde(default)]
    pub leverage: Option<Leverage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leverage {
    /// "cross" or "isolated"
    #[serde(rename = "type")]
    pub mode: String,
    pub value: u32,
}

// ===== Orders =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "B")]
    Buy,
    #[serde(rename = "A")]
    Sell,
}

impl Side {
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Resting order from `{"type": "frontendOpenOrders", "user": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    pub coin: String,
    pub side: Side,
    pub limit_px: Decimal,
    pub sz: Decimal,
    pub oid: u64,
    /// Milliseconds since epoch
    pub timestamp: i64,
    #[serde(default)]
    pub orig_sz: Option<Decimal>,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub tif: Option<String>,
    #[serde(default)]
    pub is_trigger: bool,
    #[serde(default)]
    pub trigger_px: Option<Decimal>,
}

/// Time in force for limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tif {
    #[default]
    Gtc,
    Ioc,
    Alo,
}

impl Tif {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tif::Gtc => "Gtc",
            Tif::Ioc => "Ioc",
            Tif::Alo => "Alo",
        }
    }
}

impl FromStr for Tif {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Gtc" => Ok(Tif::Gtc),
            "Ioc" => Ok(Tif::Ioc),
            "Alo" => Ok(Tif::Alo),
            other => Err(format!("Unknown time in force '{}' (expected Gtc, Ioc or Alo)", other)),
        }
    }
}

impl fmt::Display for Tif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Take-profit or stop-loss tag on trigger orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TpSl {
    Tp,
    Sl,
}

impl TpSl {
    pub fn as_str(&self) -> &'static str {
        match self {
            TpSl::Tp => "tp",
            TpSl::Sl => "sl",
        }
    }
}

impl FromStr for TpSl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tp" => Ok(TpSl::Tp),
            "sl" => Ok(TpSl::Sl),
            other => Err(format!("Unknown tpsl '{}' (expected tp or sl)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Limit {
        tif: Tif,
    },
    Trigger {
        trigger_px: Decimal,
        is_market: bool,
        tpsl: TpSl,
    },
}

impl OrderType {
    pub fn limit(tif: Tif) -> Self {
        OrderType::Limit { tif }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit { tif } => write!(f, "LIMIT ({})", tif),
            OrderType::Trigger {
                trigger_px,
                is_market,
                tpsl,
            } => {
                let kind = if *is_market { "MARKET" } else { "LIMIT" };
                let tag = match tpsl {
                    TpSl::Tp => "TAKE PROFIT",
                    TpSl::Sl => "STOP LOSS",
                };
                write!(f, "{} {} @ {}", tag, kind, trigger_px.normalize())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub coin: String,
    pub is_buy: bool,
    pub size: Decimal,
    pub limit_px: Decimal,
    pub order_type: OrderType,
    pub reduce_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    pub coin: String,
    pub oid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyRequest {
    pub coin: String,
    pub oid: u64,
    pub size: Decimal,
    pub limit_px: Decimal,
    pub order_type: OrderType,
    pub reduce_only: bool,
}

// ===== Exchange responses =====

/// Envelope returned by `/exchange`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "lowercase")]
pub enum ExchangeResponse<T> {
    Ok(ExchangeResponseBody<T>),
    Err(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeResponseBody<T> {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "Option::default")]
    pub data: Option<StatusList<T>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusList<T> {
    pub statuses: Vec<T>,
}

/// Outcome of one placed order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderStatus {
    Resting { resting: RestingOrder },
    Filled { filled: FilledOrder },
    Error { error: String },
    /// Bare status strings such as "waitingForTrigger"
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestingOrder {
    pub oid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledOrder {
    pub total_sz: Decimal,
    pub avg_px: Decimal,
    pub oid: u64,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Resting { resting } => write!(f, "Resting (order ID {})", resting.oid),
            OrderStatus::Filled { filled } => write!(
                f,
                "Filled {} @ ${} (order ID {})",
                filled.total_sz.normalize(),
                filled.avg_px.normalize(),
                filled.oid
            ),
            OrderStatus::Error { error } => write!(f, "Error: {}", error),
            OrderStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

/// Outcome of one cancel (or modify) in a batch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CancelStatus {
    Success(String),
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_asset_index_follows_universe_order() {
        let meta: Meta = serde_json::from_value(json!({
            "universe": [
                {"name": "BTC", "szDecimals": 5, "maxLeverage": 50},
                {"name": "ETH", "szDecimals": 4, "maxLeverage": 50},
                {"name": "SOL", "szDecimals": 2, "maxLeverage": 20, "onlyIsolated": true}
            ]
        }))
        .unwrap();

        assert_eq!(meta.asset_index("BTC"), Some(0));
        assert_eq!(meta.asset_index("SOL"), Some(2));
        assert_eq!(meta.asset_index("sol"), None);
        assert_eq!(meta.asset_index("DOGE"), None);
        assert!(meta.universe[2].only_isolated);
    }

    #[test]
    fn test_meta_and_asset_ctxs_from_tuple() {
        let parsed: MetaAndAssetCtxs = serde_json::from_value(json!([
            {"universe": [{"name": "BTC", "szDecimals": 5}]},
            [{"markPx": "97000.5", "funding": "0.0000125", "premium": null, "midPx": "97001.0"}]
        ]))
        .unwrap();

        let (asset, ctx) = parsed.asset("BTC").unwrap();
        assert_eq!(asset.sz_decimals, 5);
        let ctx = ctx.unwrap();
        assert_eq!(ctx.mark_px, Some(Decimal::from_str("97000.5").unwrap()));
        assert_eq!(ctx.premium, None);
        assert!(parsed.asset("ETH").is_none());
    }

    #[test]
    fn test_clearinghouse_filters_flat_positions() {
        let state: ClearinghouseState = serde_json::from_value(json!({
            "assetPositions": [
                {"type": "oneWay", "position": {
                    "coin": "BTC", "szi": "0.5", "entryPx": "95000.0", "positionValue": "48500.0",
                    "unrealizedPnl": "1000.0", "returnOnEquity": "0.21", "liquidationPx": null,
                    "marginUsed": "4850.0", "leverage": {"type": "cross", "value": 10}
                }},
                {"type": "oneWay", "position": {
                    "coin": "ETH", "szi": "0.0", "positionValue": "0.0", "unrealizedPnl": "0.0",
                    "returnOnEquity": "0.0", "marginUsed": "0.0"
                }}
            ],
            "marginSummary": {"accountValue": "10000.0", "totalNtlPos": "48500.0",
                              "totalRawUsd": "-38500.0", "totalMarginUsed": "4850.0"},
            "crossMarginSummary": {"accountValue": "10000.0", "totalNtlPos": "48500.0",
                                   "totalRawUsd": "-38500.0", "totalMarginUsed": "4850.0"},
            "withdrawable": "5150.0"
        }))
        .unwrap();

        let open = state.open_positions();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].coin, "BTC");
        assert_eq!(open[0].leverage.as_ref().unwrap().value, 10);
        assert!(open[0].liquidation_px.is_none());
    }

    #[test]
    fn test_open_order_side_codes() {
        let order: OpenOrder = serde_json::from_value(json!({
            "coin": "ETH", "side": "A", "limitPx": "3500.0", "sz": "1.5", "oid": 42,
            "timestamp": 1700000000000i64, "origSz": "2.0", "reduceOnly": true,
            "orderType": "Limit", "tif": "Gtc", "isTrigger": false, "triggerPx": "0.0"
        }))
        .unwrap();

        assert_eq!(order.side, Side::Sell);
        assert!(!order.side.is_buy());
        assert!(order.reduce_only);
        assert_eq!(order.order_type.as_deref(), Some("Limit"));
    }

    #[test]
    fn test_exchange_response_variants() {
        let ok: ExchangeResponse<OrderStatus> = serde_json::from_value(json!({
            "status": "ok",
            "response": {"type": "order", "data": {"statuses": [
                {"resting": {"oid": 77}},
                {"filled": {"totalSz": "0.02", "avgPx": "1891.4", "oid": 78}},
                {"error": "Order must have minimum value of $10."}
            ]}}
        }))
        .unwrap();
        let ExchangeResponse::Ok(body) = ok else {
            panic!("expected ok response");
        };
        let statuses = body.data.unwrap().statuses;
        assert_eq!(statuses[0], OrderStatus::Resting { resting: RestingOrder { oid: 77 } });
        assert!(matches!(statuses[1], OrderStatus::Filled { .. }));
        assert!(matches!(statuses[2], OrderStatus::Error { .. }));

        let err: ExchangeResponse<CancelStatus> = serde_json::from_value(json!({
            "status": "err",
            "response": "User or API Wallet does not exist."
        }))
        .unwrap();
        assert!(matches!(err, ExchangeResponse::Err(msg) if msg.contains("does not exist")));

        let modified: ExchangeResponse<CancelStatus> =
            serde_json::from_value(json!({"status": "ok", "response": {"type": "default"}})).unwrap();
        assert!(matches!(modified, ExchangeResponse::Ok(ExchangeResponseBody { data: None, .. })));
    }

    #[test]
    fn test_tif_and_tpsl_parsing() {
        assert_eq!("Ioc".parse::<Tif>().unwrap(), Tif::Ioc);
        assert!("ioc".parse::<Tif>().is_err());
        assert_eq!("sl".parse::<TpSl>().unwrap(), TpSl::Sl);
        assert!("stop".parse::<TpSl>().is_err());
        assert_eq!(Tif::default(), Tif::Gtc);
    }
}
