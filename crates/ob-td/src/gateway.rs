//! The order gateway.
//!
//! Wraps a [`SpotApi`] and exposes the five operations the shell offers:
//! symbol validation, three order placements, and status lookup. Every call
//! is logged with its outcome.
//!
//! Failure policy:
//! - `validate_symbol` never fails; problems are logged and reported as `false`.
//! - Placement and status calls validate input locally first. A remote failure
//!   is logged once at `error` and returned to the caller unchanged.

use ob_core::config::{BinanceConfig, Credentials};
use ob_core::enums::Side;
use ob_core::error::OrderValidationError;
use ob_core::order::{OrderRecord, OrderRequest};
use ob_core::symbol::normalize_symbol;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::SpotApi;
use crate::binance::SpotClient;
use crate::error::OrderError;

/// Single point of contact with the remote trading API.
///
/// Holds no mutable state; the only thing it owns is the API handle.
pub struct OrderGateway {
    api: Box<dyn SpotApi>,
}

impl OrderGateway {
    /// Wrap an arbitrary exchange implementation.
    pub fn new(api: impl SpotApi + 'static) -> Self {
        Self { api: Box::new(api) }
    }

    /// Build a gateway backed by the Binance Spot REST client.
    pub fn binance(credentials: Credentials, config: &BinanceConfig) -> Self {
        let client = SpotClient::new(credentials, config);
        info!(
            "[gateway] initialised — rest_url={}, testnet={}",
            client.base_url(),
            client.base_url().contains("testnet"),
        );
        Self::new(client)
    }

    /// Check that the exchange lists `symbol`.
    ///
    /// Returns `false` for malformed or unknown symbols and for remote
    /// failures. Never returns an error.
    pub async fn validate_symbol(&self, symbol: &str) -> bool {
        let symbol = match normalize_symbol(symbol) {
            Ok(s) => s,
            Err(e) => {
                error!("[gateway] symbol validation failed: {e}");
                return false;
            }
        };

        match self.api.symbol_info(&symbol).await {
            Ok(Some(info)) if !info.is_trading() => {
                warn!(
                    "[gateway] symbol {symbol} is listed but not trading (status={})",
                    info.status
                );
                true
            }
            Ok(Some(_)) => {
                info!("[gateway] symbol {symbol} validated successfully");
                true
            }
            Ok(None) => {
                error!("[gateway] symbol validation failed: invalid symbol {symbol}");
                false
            }
            Err(e) => {
                error!("[gateway] symbol validation failed: {e}");
                false
            }
        }
    }

    /// Submit an immediate-execution order.
    pub async fn place_market_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
    ) -> Result<OrderRecord, OrderError> {
        self.submit("market", OrderRequest::market(symbol, side, quantity))
            .await
    }

    /// Submit a good-till-cancelled limit order.
    pub async fn place_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderRecord, OrderError> {
        self.submit("limit", OrderRequest::limit(symbol, side, quantity, price))
            .await
    }

    /// Submit a stop-limit order: a GTC limit order at `limit_price` that
    /// becomes active once `stop_price` trades.
    pub async fn place_stop_limit_order(
        &self,
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Result<OrderRecord, OrderError> {
        let order = OrderRequest::stop_limit(symbol, side, quantity, stop_price, limit_price);
        self.submit("stop-limit", order).await
    }

    /// Fetch the current state of a previously placed order.
    pub async fn get_order_status(&self, symbol: &str, order_id: u64) -> Result<OrderRecord, OrderError> {
        let symbol = normalize_symbol(symbol).inspect_err(|e| {
            warn!("[gateway] order status rejected locally: {e}");
        })?;

        match self.api.query_order(&symbol, order_id).await {
            Ok(record) => {
                info!(
                    "[gateway] order status retrieved (final={}): {record:?}",
                    record.status.is_final()
                );
                Ok(record)
            }
            Err(e) => {
                error!("[gateway] failed to retrieve order status: {e}");
                Err(e.into())
            }
        }
    }

    async fn submit(
        &self,
        label: &str,
        order: Result<OrderRequest, OrderValidationError>,
    ) -> Result<OrderRecord, OrderError> {
        let order = order.inspect_err(|e| {
            warn!("[gateway] {label} order rejected locally: {e}");
        })?;

        match self.api.new_order(&order).await {
            Ok(record) => {
                info!("[gateway] {label} order placed: {record:?}");
                Ok(record)
            }
            Err(e) => {
                error!("[gateway] failed to place {label} order: {e}");
                Err(e.into())
            }
        }
    }
}
