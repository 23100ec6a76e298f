/// Test helpers for SDK integration tests
///
/// Every fixture talks to an in-process mock exchange; assertions go through
/// the SDK plus the mock's request log.
use hyperliquid_sdk::{ExchangeClient, Network, Wallet};
use hyperliquid_test_utils::{fixtures, TestServer, TEST_PRIVATE_KEY};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Mock exchange plus a client signed with the test key
pub struct TestFixture {
    pub server: TestServer,
    pub client: ExchangeClient,
}

impl TestFixture {
    /// Create a new test fixture on testnet signing
    pub async fn new() -> anyhow::Result<Self> {
        let server = TestServer::start().await?;
        let wallet = Wallet::from_hex(TEST_PRIVATE_KEY)?;
        let client = ExchangeClient::with_base_url(&server.base_url, wallet, Network::Testnet);

        Ok(Self { server, client })
    }

    /// Seed resting orders as (coin, oid, side, price, size)
    #[allow(dead_code)]
    pub fn with_orders(self, orders: &[(&str, u64, &str, &str, &str)]) -> Self {
        self.server.set_open_orders(
            orders
                .iter()
                .map(|(coin, oid, side, px, sz)| fixtures::open_order(coin, *oid, side, px, sz))
                .collect(),
        );
        self
    }
}

#[allow(dead_code)]
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("Invalid decimal literal")
}
