//! Binance Spot REST client.
//!
//! # REST endpoints
//!
//! | Operation     | Method | Path                    | Signed |
//! |---------------|--------|-------------------------|--------|
//! | Symbol info   | GET    | `/api/v3/exchangeInfo`  | no     |
//! | Place order   | POST   | `/api/v3/order`         | yes    |
//! | Query order   | GET    | `/api/v3/order`         | yes    |
//!
//! Orders are placed with `newOrderRespType=RESULT` so the response carries
//! the full order (status, quantities, prices) rather than just the id.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use ob_core::config::{BinanceConfig, Credentials};
use ob_core::order::{OrderRecord, OrderRequest, SymbolInfo};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::auth;
use crate::SpotApi;
use crate::error::{CODE_INVALID_SYMBOL, RemoteApiError};

/// `exchangeInfo` envelope; only the symbol list is used.
#[derive(Deserialize)]
struct ExchangeInfo {
    #[serde(default)]
    symbols: Vec<SymbolInfo>,
}

/// Binance Spot account client.
///
/// Stateless apart from the HTTP connection pool and the credentials it signs
/// with.
pub struct SpotClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// API key (header) and secret (HMAC key).
    credentials: Credentials,
    /// REST base URL (e.g. `https://testnet.binance.vision`).
    base_url: String,
    /// `recvWindow` for signed requests.
    recv_window: u64,
}

impl SpotClient {
    /// Create a new spot client (no connections opened yet).
    pub fn new(credentials: Credentials, config: &BinanceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            base_url: config.rest_url.trim_end_matches('/').to_string(),
            recv_window: config.recv_window,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Public endpoints
    // -----------------------------------------------------------------------

    /// Look up one symbol. An unknown symbol is `Ok(None)`, not an error.
    pub async fn get_symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, RemoteApiError> {
        let url = format!("{}/api/v3/exchangeInfo", self.base_url);
        let resp = self.http.get(&url).query(&[("symbol", symbol)]).send().await?;

        match decode::<ExchangeInfo>(resp).await {
            Ok(info) => Ok(info.symbols.into_iter().find(|s| s.symbol == symbol)),
            Err(e) if e.code() == Some(CODE_INVALID_SYMBOL) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // -----------------------------------------------------------------------
    // Signed endpoints
    // -----------------------------------------------------------------------

    /// Submit a new order.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<OrderRecord, RemoteApiError> {
        let params = order_params(order);
        let query = self.signed_query(&params);
        debug!("[spot] POST /api/v3/order {}", auth::encode_query(&borrow(&params)));

        let url = format!("{}/api/v3/order?{query}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .header("X-MBX-APIKEY", self.credentials.api_key())
            .send()
            .await?;
        decode(resp).await
    }

    /// Fetch the current state of an order.
    pub async fn get_order(&self, symbol: &str, order_id: u64) -> Result<OrderRecord, RemoteApiError> {
        let params = vec![("symbol", symbol.to_string()), ("orderId", order_id.to_string())];
        let query = self.signed_query(&params);

        let url = format!("{}/api/v3/order?{query}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .header("X-MBX-APIKEY", self.credentials.api_key())
            .send()
            .await?;
        decode(resp).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Append `recvWindow` and `timestamp`, then sign.
    fn signed_query(&self, params: &[(&str, String)]) -> String {
        let recv_str = self.recv_window.to_string();
        let timestamp = current_timestamp_ms();
        let mut all = borrow(params);
        all.push(("recvWindow", &recv_str));
        all.push(("timestamp", &timestamp));
        auth::build_signed_query(&all, self.credentials.secret_key())
    }
}

#[async_trait]
impl SpotApi for SpotClient {
    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, RemoteApiError> {
        self.get_symbol_info(symbol).await
    }

    async fn new_order(&self, order: &OrderRequest) -> Result<OrderRecord, RemoteApiError> {
        self.place_order(order).await
    }

    async fn query_order(&self, symbol: &str, order_id: u64) -> Result<OrderRecord, RemoteApiError> {
        self.get_order(symbol, order_id).await
    }
}

/// Request parameters for `POST /api/v3/order`, excluding the signing fields.
pub(crate) fn order_params(order: &OrderRequest) -> Vec<(&'static str, String)> {
    let kind = order.kind();
    let mut params = vec![
        ("symbol", order.symbol().to_string()),
        ("side", order.side().as_str().to_string()),
        ("type", kind.order_type().as_str().to_string()),
        ("quantity", order.quantity().normalize().to_string()),
    ];
    if let Some(tif) = kind.time_in_force() {
        params.push(("timeInForce", tif.as_str().to_string()));
    }
    if let Some(price) = kind.price() {
        params.push(("price", price.normalize().to_string()));
    }
    if let Some(stop) = kind.stop_price() {
        params.push(("stopPrice", stop.normalize().to_string()));
    }
    params.push(("newOrderRespType", "RESULT".to_string()));
    params
}

fn borrow<'a>(params: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
    params.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

/// Decode a success body, or classify the failure.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, RemoteApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(RemoteApiError::from_response(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|e| RemoteApiError::Decode(format!("{e}: {body}")))
}

/// Returns the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .to_string()
}
