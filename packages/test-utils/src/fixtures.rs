use serde_json::{json, Map, Value};

/// Throwaway key used by every test client
pub const TEST_PRIVATE_KEY: &str =
    "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// BTC, ETH, SOL in that order (asset ids 0, 1, 2)
pub fn universe() -> Vec<Value> {
    vec![
        json!({"name": "BTC", "szDecimals": 5, "maxLeverage": 40}),
        json!({"name": "ETH", "szDecimals": 4, "maxLeverage": 25}),
        json!({"name": "SOL", "szDecimals": 2, "maxLeverage": 20, "onlyIsolated": false}),
    ]
}

/// Market context per asset, aligned with [`universe`]
pub fn asset_ctxs() -> Vec<Value> {
    vec![
        json!({
            "funding": "0.0000125", "openInterest": "21500.5", "prevDayPx": "96000.0",
            "dayNtlVlm": "1500000000.0", "premium": "0.0001", "oraclePx": "97010.0",
            "markPx": "97005.0", "midPx": "97000.5"
        }),
        json!({
            "funding": "0.00001", "openInterest": "350000.0", "prevDayPx": "98.0",
            "dayNtlVlm": "750000000.0", "premium": null, "oraclePx": "100.1",
            "markPx": "100.05", "midPx": "100.0"
        }),
        json!({
            "funding": "-0.00002", "openInterest": "1200000.0", "prevDayPx": "150.0",
            "dayNtlVlm": "90000000.0", "premium": "-0.0002", "oraclePx": "150.3",
            "markPx": "150.28", "midPx": "150.25"
        }),
    ]
}

/// Mid prices; ETH sits at exactly 100 for slippage arithmetic
pub fn mids() -> Map<String, Value> {
    let mut mids = Map::new();
    mids.insert("BTC".to_string(), json!("97000.5"));
    mids.insert("ETH".to_string(), json!("100.0"));
    mids.insert("SOL".to_string(), json!("150.25"));
    mids
}

/// Resting limit order in `frontendOpenOrders` shape
///
/// `side` is "B" for buys, "A" for sells.
pub fn open_order(coin: &str, oid: u64, side: &str, limit_px: &str, sz: &str) -> Value {
    json!({
        "coin": coin,
        "side": side,
        "limitPx": limit_px,
        "sz": sz,
        "oid": oid,
        "timestamp": 1_700_000_000_000i64,
        "origSz": sz,
        "reduceOnly": false,
        "orderType": "Limit",
        "tif": "Gtc",
        "isTrigger": false,
        "triggerPx": "0.0",
        "isPositionTpsl": false
    })
}

/// Cross-margin position entry
pub fn position(coin: &str, szi: &str, entry_px: &str, unrealized_pnl: &str) -> Value {
    json!({
        "type": "oneWay",
        "position": {
            "coin": coin,
            "szi": szi,
            "entryPx": entry_px,
            "positionValue": "1000.0",
            "unrealizedPnl": unrealized_pnl,
            "returnOnEquity": "0.05",
            "liquidationPx": null,
            "marginUsed": "100.0",
            "leverage": {"type": "cross", "value": 10},
            "maxLeverage": 40,
            "cumFunding": {"allTime": "0.0", "sinceOpen": "0.0", "sinceChange": "0.0"}
        }
    })
}

/// `clearinghouseState` wrapping the given positions
pub fn user_state(positions: Vec<Value>) -> Value {
    let summary = json!({
        "accountValue": "12345.67",
        "totalNtlPos": "1000.0",
        "totalRawUsd": "11345.67",
        "totalMarginUsed": "100.0"
    });
    json!({
        "assetPositions": positions,
        "marginSummary": summary.clone(),
        "crossMarginSummary": summary,
        "crossMaintenanceMarginUsed": "25.0",
        "withdrawable": "12245.67",
        "time": 1_700_000_000_000i64
    })
}
