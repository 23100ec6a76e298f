use crate::fixtures;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex, MutexGuard};

const ORDER_GONE: &str = "Order was never placed, already canceled, or filled.";

/// Scripted state behind the mock exchange
#[derive(Debug)]
pub struct MockState {
    pub universe: Vec<Value>,
    pub asset_ctxs: Vec<Value>,
    pub mids: Map<String, Value>,
    pub open_orders: Vec<Value>,
    pub user_state: Value,
    /// When set, `/info` answers 500 with this body
    pub info_failure: Option<String>,
    /// When set, `/exchange` answers `{"status":"err"}` with this message
    pub exchange_rejection: Option<String>,
    /// Order ids whose cancel returns an error status
    pub failing_cancels: Vec<u64>,
    /// Info request types in arrival order
    pub info_requests: Vec<String>,
    /// Signed payloads posted to `/exchange`
    pub exchange_requests: Vec<Value>,
    next_oid: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            universe: fixtures::universe(),
            asset_ctxs: fixtures::asset_ctxs(),
            mids: fixtures::mids(),
            open_orders: Vec::new(),
            user_state: fixtures::user_state(Vec::new()),
            info_failure: None,
            exchange_rejection: None,
            failing_cancels: Vec::new(),
            info_requests: Vec::new(),
            exchange_requests: Vec::new(),
            next_oid: 1000,
        }
    }
}

type SharedState = Arc<Mutex<MockState>>;

/// Handle to a running mock exchange
///
/// Serves `POST /info` and `POST /exchange` from a [`MockState`] that tests
/// can script before a call and inspect after it.
pub struct TestServer {
    pub base_url: String,
    state: SharedState,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Start a mock exchange on a random available port with default fixtures
    ///
    /// The server runs in the background and will shutdown when dropped.
    pub async fn start() -> anyhow::Result<Self> {
        Self::with_state(MockState::default()).await
    }

    /// Start a mock exchange serving the given state
    pub async fn with_state(state: MockState) -> anyhow::Result<Self> {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/info", post(info))
            .route("/exchange", post(exchange))
            .with_state(state.clone());

        // Bind to random available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let base_url = format!("http://{}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed to start");
        });

        Ok(Self {
            base_url,
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Lock the mock state for scripting or inspection
    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    /// Actions posted to `/exchange`, oldest first
    pub fn actions(&self) -> Vec<Value> {
        self.state()
            .exchange_requests
            .iter()
            .map(|payload| payload["action"].clone())
            .collect()
    }

    /// Actions of one `type` ("order", "cancel", "modify")
    pub fn actions_of(&self, kind: &str) -> Vec<Value> {
        self.actions()
            .into_iter()
            .filter(|action| action["type"] == kind)
            .collect()
    }

    /// Info request types received so far
    pub fn info_requests(&self) -> Vec<String> {
        self.state().info_requests.clone()
    }

    pub fn set_open_orders(&self, orders: Vec<Value>) {
        self.state().open_orders = orders;
    }

    pub fn set_positions(&self, positions: Vec<Value>) {
        self.state().user_state = fixtures::user_state(positions);
    }

    pub fn fail_info(&self, message: &str) {
        self.state().info_failure = Some(message.to_string());
    }

    pub fn reject_exchange(&self, message: &str) {
        self.state().exchange_rejection = Some(message.to_string());
    }

    pub fn fail_cancel(&self, oid: u64) {
        self.state().failing_cancels.push(oid);
    }
}

async fn info(State(state): State<SharedState>, Json(request): Json<Value>) -> Response {
    let mut state = state.lock().expect("mock state poisoned");
    let kind = request["type"].as_str().unwrap_or_default().to_string();
    state.info_requests.push(kind.clone());

    if let Some(message) = &state.info_failure {
        return (StatusCode::INTERNAL_SERVER_ERROR, message.clone()).into_response();
    }

    let body = match kind.as_str() {
        "meta" => json!({ "universe": state.universe }),
        "metaAndAssetCtxs" => json!([{ "universe": state.universe }, state.asset_ctxs]),
        "allMids" => Value::Object(state.mids.clone()),
        "clearinghouseState" => state.user_state.clone(),
        "frontendOpenOrders" | "openOrders" => Value::Array(state.open_orders.clone()),
        other => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Unknown info type: {}", other),
            )
                .into_response();
        }
    };
    Json(body).into_response()
}

async fn exchange(State(state): State<SharedState>, Json(payload): Json<Value>) -> Response {
    let mut state = state.lock().expect("mock state poisoned");
    state.exchange_requests.push(payload.clone());

    if let Some(message) = &state.exchange_rejection {
        return Json(json!({ "status": "err", "response": message })).into_response();
    }

    let action = &payload["action"];
    let body = match action["type"].as_str().unwrap_or_default() {
        "order" => {
            let statuses: Vec<Value> = action["orders"]
                .as_array()
                .map(|orders| orders.iter().map(|order| state.place(order)).collect())
                .unwrap_or_default();
            statuses_response("order", statuses)
        }
        "cancel" => {
            let statuses: Vec<Value> = action["cancels"]
                .as_array()
                .map(|cancels| cancels.iter().map(|cancel| state.cancel(cancel)).collect())
                .unwrap_or_default();
            statuses_response("cancel", statuses)
        }
        "modify" => {
            let oid = action["oid"].as_u64().unwrap_or_default();
            if state.modify(oid, &action["order"]) {
                json!({ "status": "ok", "response": { "type": "default" } })
            } else {
                json!({ "status": "err", "response": "Cannot modify canceled or filled order" })
            }
        }
        other => json!({ "status": "err", "response": format!("Unknown action: {}", other) }),
    };
    Json(body).into_response()
}

fn statuses_response(kind: &str, statuses: Vec<Value>) -> Value {
    json!({
        "status": "ok",
        "response": { "type": kind, "data": { "statuses": statuses } }
    })
}

impl MockState {
    fn coin(&self, asset: &Value) -> String {
        asset
            .as_u64()
            .and_then(|index| self.universe.get(index as usize))
            .and_then(|meta| meta["name"].as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Ioc orders fill immediately; everything else rests on the book
    fn place(&mut self, order: &Value) -> Value {
        let oid = self.next_oid;
        self.next_oid += 1;

        let is_ioc = order["t"]["limit"]["tif"] == "Ioc";
        if is_ioc {
            return json!({ "filled": { "totalSz": order["s"], "avgPx": order["p"], "oid": oid } });
        }

        let side = if order["b"].as_bool().unwrap_or_default() { "B" } else { "A" };
        let mut resting = fixtures::open_order(
            &self.coin(&order["a"]),
            oid,
            side,
            order["p"].as_str().unwrap_or_default(),
            order["s"].as_str().unwrap_or_default(),
        );
        resting["reduceOnly"] = order["r"].clone();
        if let Some(trigger) = order["t"].get("trigger") {
            resting["isTrigger"] = json!(true);
            resting["triggerPx"] = trigger["triggerPx"].clone();
            resting["orderType"] = json!(match trigger["tpsl"].as_str() {
                Some("tp") => "Take Profit Market",
                _ => "Stop Market",
            });
        }
        self.open_orders.push(resting);
        json!({ "resting": { "oid": oid } })
    }

    fn cancel(&mut self, cancel: &Value) -> Value {
        let oid = cancel["o"].as_u64().unwrap_or_default();
        if self.failing_cancels.contains(&oid) {
            return json!({ "error": ORDER_GONE });
        }

        let before = self.open_orders.len();
        self.open_orders.retain(|order| order["oid"].as_u64() != Some(oid));
        if self.open_orders.len() < before {
            json!("success")
        } else {
            json!({ "error": ORDER_GONE })
        }
    }

    fn modify(&mut self, oid: u64, order: &Value) -> bool {
        match self
            .open_orders
            .iter_mut()
            .find(|open| open["oid"].as_u64() == Some(oid))
        {
            Some(open) => {
                open["limitPx"] = order["p"].clone();
                open["sz"] = order["s"].clone();
                open["side"] = json!(if order["b"].as_bool().unwrap_or_default() { "B" } else { "A" });
                true
            }
            None => false,
        }
    }
}
