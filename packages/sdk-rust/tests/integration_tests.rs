/// Info endpoint tests against the mock exchange

mod helpers;

use helpers::{dec, TestFixture};
use hyperliquid_test_utils::fixtures;

#[tokio::test]
async fn test_get_user_state() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");
    fixture.server.set_positions(vec![
        fixtures::position("BTC", "0.5", "95000.0", "1000.5"),
        fixtures::position("ETH", "0.0", "100.0", "0.0"),
    ]);

    let state = fixture
        .client
        .get_user_state()
        .await
        .expect("Failed to get user state");

    assert_eq!(state.asset_positions.len(), 2);
    assert_eq!(state.margin_summary.account_value, dec("12345.67"));
    assert_eq!(state.withdrawable, dec("12245.67"));

    let open = state.open_positions();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].coin, "BTC");
    assert_eq!(open[0].entry_px, Some(dec("95000.0")));
    assert_eq!(open[0].liquidation_px, None);
    assert_eq!(open[0].leverage.as_ref().map(|l| l.value), Some(10));

    assert_eq!(fixture.server.info_requests(), vec!["clearinghouseState"]);
}

#[tokio::test]
async fn test_get_open_orders() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture")
        .with_orders(&[("BTC", 1, "B", "90000.0", "0.1"), ("ETH", 2, "A", "120.5", "3")]);

    let orders = fixture
        .client
        .get_open_orders()
        .await
        .expect("Failed to get open orders");

    assert_eq!(orders.len(), 2);
    assert!(orders[0].side.is_buy());
    assert!(!orders[1].side.is_buy());
    assert_eq!(orders[1].limit_px, dec("120.5"));
    assert_eq!(orders[1].order_type.as_deref(), Some("Limit"));
    assert_eq!(fixture.server.info_requests(), vec!["frontendOpenOrders"]);
}

#[tokio::test]
async fn test_get_open_orders_empty() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");

    let orders = fixture
        .client
        .get_open_orders()
        .await
        .expect("Failed to get open orders");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_get_all_mids() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");

    let mids = fixture
        .client
        .get_all_mids()
        .await
        .expect("Failed to get mids");

    assert_eq!(mids.len(), 3);
    assert_eq!(mids.get("ETH"), Some(&dec("100.0")));
    assert!(!mids.contains_key("DOGE"));
}

#[tokio::test]
async fn test_get_meta_and_asset_ctxs() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");

    let market = fixture
        .client
        .get_meta_and_asset_ctxs()
        .await
        .expect("Failed to get meta and asset contexts");

    assert_eq!(market.meta.universe.len(), 3);
    assert_eq!(market.asset_ctxs.len(), 3);

    let (meta, ctx) = market.asset("SOL").expect("SOL missing");
    assert_eq!(meta.sz_decimals, 2);
    assert_eq!(ctx.and_then(|c| c.mark_px), Some(dec("150.28")));

    let (_, eth_ctx) = market.asset("ETH").expect("ETH missing");
    assert_eq!(eth_ctx.and_then(|c| c.premium), None);
}

#[tokio::test]
async fn test_resolve_asset_index() {
    let fixture = TestFixture::new()
        .await
        .expect("Failed to create test fixture");

    assert_eq!(fixture.client.resolve_asset_index("BTC").await.unwrap(), 0);
    assert_eq!(fixture.client.resolve_asset_index("ETH").await.unwrap(), 1);
    assert_eq!(fixture.client.resolve_asset_index("SOL").await.unwrap(), 2);
}
