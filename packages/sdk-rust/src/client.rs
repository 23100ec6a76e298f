use crate::actions::{Action, ExchangePayload, OrderWire};
use crate::error::{SdkError, SdkResult};
use crate::network::Network;
use crate::signing::Wallet;
use crate::types::*;
use futures::future::join_all;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// REST client for the Hyperliquid info and exchange endpoints
///
/// Holds one wallet and one network for its whole lifetime. Every mutating
/// call resolves the coin's asset index from a fresh universe fetch.
/// Clones share one nonce sequence.
#[derive(Clone)]
pub struct ExchangeClient {
    base_url: String,
    client: Client,
    wallet: Wallet,
    network: Network,
    last_nonce: Arc<AtomicU64>,
}

impl ExchangeClient {
    /// Create a client against the network's public API
    pub fn new(wallet: Wallet, network: Network) -> Self {
        Self::with_base_url(network.api_url(), wallet, network)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>, wallet: Wallet, network: Network) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            wallet,
            network,
            last_nonce: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn wallet_address(&self) -> &str {
        self.wallet.address()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Info Endpoints =====

    /// Margin and position snapshot for the wallet
    pub async fn get_user_state(&self) -> SdkResult<ClearinghouseState> {
        self.post_info(json!({
            "type": "clearinghouseState",
            "user": self.wallet_address(),
        }))
        .await
    }

    /// Resting orders for the wallet
    pub async fn get_open_orders(&self) -> SdkResult<Vec<OpenOrder>> {
        self.post_info(json!({
            "type": "frontendOpenOrders",
            "user": self.wallet_address(),
        }))
        .await
    }

    /// Mid price per coin
    pub async fn get_all_mids(&self) -> SdkResult<HashMap<String, Decimal>> {
        self.post_info(json!({ "type": "allMids" })).await
    }

    /// Perpetuals universe
    pub async fn get_meta(&self) -> SdkResult<Meta> {
        self.post_info(json!({ "type": "meta" })).await
    }

    /// Universe plus per-asset market context
    pub async fn get_meta_and_asset_ctxs(&self) -> SdkResult<MetaAndAssetCtxs> {
        self.post_info(json!({ "type": "metaAndAssetCtxs" })).await
    }

    /// Asset index of `coin` in the current universe
    pub async fn resolve_asset_index(&self, coin: &str) -> SdkResult<u32> {
        let meta = self.get_meta().await?;
        meta.asset_index(coin)
            .ok_or_else(|| SdkError::AssetNotFound(coin.to_string()))
    }

    // ===== Exchange Endpoints =====

    /// Place a single order
    pub async fn place_order(&self, request: OrderRequest) -> SdkResult<OrderStatus> {
        debug!("placeOrder {:?}", request);
        let asset = self.resolve_asset_index(&request.coin).await?;

        let action = Action::single_order(OrderWire::from_request(asset, &request));
        let status = self.post_single_status::<OrderStatus>(action).await?;

        match status {
            OrderStatus::Error { error } => Err(SdkError::Rejected(error)),
            status => Ok(status),
        }
    }

    /// Cancel one order by id
    pub async fn cancel_order(&self, request: CancelRequest) -> SdkResult<()> {
        debug!("cancelOrder {:?}", request);
        let asset = self.resolve_asset_index(&request.coin).await?;

        let action = Action::single_cancel(asset, request.oid);
        match self.post_single_status::<CancelStatus>(action).await? {
            CancelStatus::Success(_) => Ok(()),
            CancelStatus::Error { error } => Err(SdkError::Rejected(error)),
        }
    }

    /// Cancel every open order, or every open order for `coin`
    ///
    /// Cancels run concurrently and all of them settle before this returns.
    /// Returns the number cancelled; zero means nothing matched and no
    /// cancel was sent.
    pub async fn cancel_all_orders(&self, coin: Option<&str>) -> SdkResult<usize> {
        let orders: Vec<OpenOrder> = self
            .get_open_orders()
            .await?
            .into_iter()
            .filter(|order| coin.is_none_or(|c| order.coin == c))
            .collect();

        if orders.is_empty() {
            return Ok(0);
        }

        let cancels = orders.iter().map(|order| {
            self.cancel_order(CancelRequest {
                coin: order.coin.clone(),
                oid: order.oid,
            })
        });
        let results = join_all(cancels).await;

        let total = results.len();
        let mut errors = results.into_iter().filter_map(Result::err);
        match errors.next() {
            None => Ok(total),
            Some(first) => {
                let failed = 1 + errors.count();
                warn!("{} of {} cancels failed: {}", failed, total, first);
                Err(SdkError::PartialCancel {
                    cancelled: total - failed,
                    failed,
                    first_error: first.to_string(),
                })
            }
        }
    }

    /// Replace a resting order's price, size and type
    ///
    /// The side is taken from the existing order, which must still be open.
    pub async fn modify_order(&self, request: ModifyRequest) -> SdkResult<()> {
        debug!("modifyOrder {:?}", request);
        let asset = self.resolve_asset_index(&request.coin).await?;

        let existing = self
            .get_open_orders()
            .await?
            .into_iter()
            .find(|order| order.oid == request.oid && order.coin == request.coin)
            .ok_or(SdkError::OrderNotFound(request.oid))?;

        let order = OrderWire::new(
            asset,
            existing.side.is_buy(),
            request.limit_px,
            request.size,
            request.reduce_only,
            request.order_type,
        );

        match self.post_exchange::<CancelStatus>(Action::modify(request.oid, order)).await? {
            Some(statuses) => match statuses.into_iter().next() {
                Some(CancelStatus::Error { error }) => Err(SdkError::Rejected(error)),
                _ => Ok(()),
            },
            None => Ok(()),
        }
    }

    // ===== Internal Helper Methods =====

    /// Millisecond timestamp, bumped past the previous nonce when two
    /// actions are signed within the same millisecond
    fn next_nonce(&self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis() as u64;
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)));
        match previous {
            Ok(last) | Err(last) => now.max(last + 1),
        }
    }

    async fn post_info<T: DeserializeOwned>(&self, request: serde_json::Value) -> SdkResult<T> {
        let url = format!("{}/info", self.base_url);
        let response = self.client.post(&url).json(&request).send().await?;

        if response.status().is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(SdkError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }

    /// Sign and submit an action; returns the per-item statuses, if any
    async fn post_exchange<T: DeserializeOwned>(&self, action: Action) -> SdkResult<Option<Vec<T>>> {
        let nonce = self.next_nonce();
        let signature = self.wallet.sign_l1_action(&action, nonce, self.network)?;
        debug!("Submitting {} action with nonce {}", action.kind(), nonce);

        let payload = ExchangePayload {
            action,
            nonce,
            signature,
            vault_address: None,
        };

        let url = format!("{}/exchange", self.base_url);
        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(SdkError::ApiError {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.text().await?;
        match serde_json::from_str::<ExchangeResponse<T>>(&body)? {
            ExchangeResponse::Ok(ok) => Ok(ok.data.map(|data| data.statuses)),
            ExchangeResponse::Err(message) => Err(SdkError::Rejected(message)),
        }
    }

    async fn post_single_status<T: DeserializeOwned>(&self, action: Action) -> SdkResult<T> {
        self.post_exchange::<T>(action)
            .await?
            .and_then(|statuses| statuses.into_iter().next())
            .ok_or_else(|| SdkError::InvalidResponse("Expected one status".to_string()))
    }
}
