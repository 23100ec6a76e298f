//! `/exchange` action payloads
//!
//! Field order is significant: actions are msgpack-encoded in declaration
//! order before hashing, so these structs mirror the exchange's key order.

use crate::format::to_wire;
use crate::signing::WireSignature;
use crate::types::{OrderRequest, OrderType};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Order(BulkOrder),
    Cancel(BulkCancel),
    Modify(ModifyWire),
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkOrder {
    pub orders: Vec<OrderWire>,
    pub grouping: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkCancel {
    pub cancels: Vec<CancelWire>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModifyWire {
    pub oid: u64,
    pub order: OrderWire,
}

/// Single order in exchange wire format
#[derive(Debug, Clone, Serialize)]
pub struct OrderWire {
    /// Asset index
    pub a: u32,
    /// Is buy
    pub b: bool,
    /// Limit price
    pub p: String,
    /// Size
    pub s: String,
    /// Reduce only
    pub r: bool,
    /// Order type
    pub t: OrderTypeWire,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderTypeWire {
    Limit(LimitWire),
    Trigger(TriggerWire),
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitWire {
    pub tif: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerWire {
    pub is_market: bool,
    pub trigger_px: String,
    pub tpsl: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelWire {
    /// Asset index
    pub a: u32,
    /// Order id
    pub o: u64,
}

/// Signed body posted to `/exchange`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePayload {
    pub action: Action,
    pub nonce: u64,
    pub signature: WireSignature,
    pub vault_address: Option<String>,
}

impl From<OrderType> for OrderTypeWire {
    fn from(order_type: OrderType) -> Self {
        match order_type {
            OrderType::Limit { tif } => OrderTypeWire::Limit(LimitWire {
                tif: tif.as_str().to_string(),
            }),
            OrderType::Trigger {
                trigger_px,
                is_market,
                tpsl,
            } => OrderTypeWire::Trigger(TriggerWire {
                is_market,
                trigger_px: to_wire(trigger_px),
                tpsl: tpsl.as_str().to_string(),
            }),
        }
    }
}

impl OrderWire {
    pub fn new(
        asset: u32,
        is_buy: bool,
        limit_px: rust_decimal::Decimal,
        size: rust_decimal::Decimal,
        reduce_only: bool,
        order_type: OrderType,
    ) -> Self {
        Self {
            a: asset,
            b: is_buy,
            p: to_wire(limit_px),
            s: to_wire(size),
            r: reduce_only,
            t: order_type.into(),
        }
    }

    pub fn from_request(asset: u32, request: &OrderRequest) -> Self {
        Self::new(
            asset,
            request.is_buy,
            request.limit_px,
            request.size,
            request.reduce_only,
            request.order_type,
        )
    }
}

impl Action {
    pub fn single_order(order: OrderWire) -> Self {
        Action::Order(BulkOrder {
            orders: vec![order],
            grouping: "na".to_string(),
        })
    }

    pub fn single_cancel(asset: u32, oid: u64) -> Self {
        Action::Cancel(BulkCancel {
            cancels: vec![CancelWire { a: asset, o: oid }],
        })
    }

    pub fn modify(oid: u64, order: OrderWire) -> Self {
        Action::Modify(ModifyWire { oid, order })
    }

    /// Action type name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Order(_) => "order",
            Action::Cancel(_) => "cancel",
            Action::Modify(_) => "modify",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tif, TpSl};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_limit_order_json_shape() {
        let order = OrderWire::new(3, true, dec("105.00"), dec("0.0100"), false, OrderType::limit(Tif::Ioc));
        let action = Action::single_order(order);

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "type": "order",
                "orders": [{"a": 3, "b": true, "p": "105", "s": "0.01", "r": false, "t": {"limit": {"tif": "Ioc"}}}],
                "grouping": "na"
            })
        );
    }

    #[test]
    fn test_trigger_order_json_shape() {
        let order_type = OrderType::Trigger {
            trigger_px: dec("90000.50"),
            is_market: true,
            tpsl: TpSl::Sl,
        };
        let wire: OrderTypeWire = order_type.into();

        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({"trigger": {"isMarket": true, "triggerPx": "90000.5", "tpsl": "sl"}})
        );
    }

    #[test]
    fn test_cancel_and_modify_json_shape() {
        assert_eq!(
            serde_json::to_value(Action::single_cancel(1, 987654)).unwrap(),
            json!({"type": "cancel", "cancels": [{"a": 1, "o": 987654}]})
        );

        let order = OrderWire::new(0, false, dec("100"), dec("2"), true, OrderType::limit(Tif::Gtc));
        let value = serde_json::to_value(Action::modify(55, order)).unwrap();
        assert_eq!(value["type"], "modify");
        assert_eq!(value["oid"], 55);
        assert_eq!(value["order"]["b"], false);
        assert_eq!(value["order"]["r"], true);
    }

    #[test]
    fn test_action_encodes_as_msgpack_map() {
        let action = Action::single_cancel(0, 1);
        let bytes = rmp_serde::to_vec_named(&action).unwrap();
        // fixmap with two entries: "type" and "cancels"
        assert_eq!(bytes[0], 0x82);
        assert_eq!(&bytes[1..6], &[0xa4, b't', b'y', b'p', b'e']);
    }
}
