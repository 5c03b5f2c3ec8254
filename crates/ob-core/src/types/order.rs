//! Order request and order record types.
//!
//! [`OrderRequest`] flows from the shell into the gateway. [`OrderRecord`] is
//! what the exchange sends back, both for placement and for status queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{OrderStatus, OrderType, Side, TimeInForce};
use super::symbol::normalize_symbol;
use crate::error::OrderValidationError;

// ---------------------------------------------------------------------------
// Order request (shell → gateway)
// ---------------------------------------------------------------------------

/// Order-type specific parameters. Each variant carries exactly the prices it
/// needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Executes immediately at the best available price.
    Market,
    /// Rests on the book (GTC) until filled at `price` or better.
    Limit { price: Decimal },
    /// Becomes a GTC limit order at `limit_price` once `stop_price` trades.
    StopLimit {
        stop_price: Decimal,
        limit_price: Decimal,
    },
}

impl OrderKind {
    /// The exchange order type this kind is submitted as.
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Market => OrderType::Market,
            Self::Limit { .. } => OrderType::Limit,
            Self::StopLimit { .. } => OrderType::StopLossLimit,
        }
    }

    /// Resting orders are always good-till-cancelled.
    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self {
            Self::Market => None,
            Self::Limit { .. } | Self::StopLimit { .. } => Some(TimeInForce::Gtc),
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match *self {
            Self::Market => None,
            Self::Limit { price } => Some(price),
            Self::StopLimit { limit_price, .. } => Some(limit_price),
        }
    }

    pub fn stop_price(&self) -> Option<Decimal> {
        match *self {
            Self::StopLimit { stop_price, .. } => Some(stop_price),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), OrderValidationError> {
        match *self {
            Self::Market => Ok(()),
            Self::Limit { price } => positive(price, "price"),
            Self::StopLimit {
                stop_price,
                limit_price,
            } => {
                positive(stop_price, "stop price")?;
                positive(limit_price, "limit price")
            }
        }
    }
}

fn positive(value: Decimal, field: &'static str) -> Result<(), OrderValidationError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(OrderValidationError::NonPositivePrice { field })
    }
}

/// A validated order, ready to be signed and sent.
///
/// Fields are private so an `OrderRequest` can only exist in a valid state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    symbol: String,
    side: Side,
    quantity: Decimal,
    kind: OrderKind,
}

impl OrderRequest {
    /// Build and validate an order request.
    ///
    /// The symbol is normalised to upper case. Quantity and every price the
    /// kind carries must be strictly positive.
    pub fn new(
        symbol: &str,
        side: Side,
        quantity: Decimal,
        kind: OrderKind,
    ) -> Result<Self, OrderValidationError> {
        let symbol = normalize_symbol(symbol)?;
        if quantity <= Decimal::ZERO {
            return Err(OrderValidationError::NonPositiveQuantity);
        }
        kind.validate()?;
        Ok(Self {
            symbol,
            side,
            quantity,
            kind,
        })
    }

    pub fn market(symbol: &str, side: Side, quantity: Decimal) -> Result<Self, OrderValidationError> {
        Self::new(symbol, side, quantity, OrderKind::Market)
    }

    pub fn limit(
        symbol: &str,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<Self, OrderValidationError> {
        Self::new(symbol, side, quantity, OrderKind::Limit { price })
    }

    pub fn stop_limit(
        symbol: &str,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    ) -> Result<Self, OrderValidationError> {
        Self::new(
            symbol,
            side,
            quantity,
            OrderKind::StopLimit {
                stop_price,
                limit_price,
            },
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn kind(&self) -> &OrderKind {
        &self.kind
    }
}

// ---------------------------------------------------------------------------
// Order record (exchange → shell)
// ---------------------------------------------------------------------------

/// An order as reported by the exchange.
///
/// Decoded from both the placement response (`newOrderRespType=RESULT`, which
/// carries `transactTime`) and the order query response (which carries
/// `time`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub client_order_id: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    /// Limit price. Absent for market orders.
    #[serde(default, deserialize_with = "nonzero_decimal")]
    pub price: Option<Decimal>,
    /// Trigger price. Absent unless the order is a stop order.
    #[serde(default, deserialize_with = "nonzero_decimal")]
    pub stop_price: Option<Decimal>,
    pub status: OrderStatus,
    /// Creation time in milliseconds since the Unix epoch.
    #[serde(default, alias = "transactTime")]
    pub time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
}

impl OrderRecord {
    /// Creation time as a UTC timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(DateTime::from_timestamp_millis)
    }

    /// Last change as a UTC timestamp. Only order queries report it.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time.and_then(DateTime::from_timestamp_millis)
    }
}

/// Binance echoes `"0.00000000"` for prices that do not apply.
fn nonzero_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Decimal> = Option::deserialize(deserializer)?;
    Ok(value.filter(|d| !d.is_zero()))
}

// ---------------------------------------------------------------------------
// Symbol metadata
// ---------------------------------------------------------------------------

/// The subset of `exchangeInfo.symbols[]` the gateway cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub base_asset: String,
    pub quote_asset: String,
}

impl SymbolInfo {
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn request_normalises_symbol() {
        let req = OrderRequest::market("btcusdt", Side::Buy, dec("0.01")).unwrap();
        assert_eq!(req.symbol(), "BTCUSDT");
        assert_eq!(req.kind().order_type(), OrderType::Market);
        assert_eq!(req.kind().time_in_force(), None);
    }

    #[test]
    fn request_rejects_zero_quantity() {
        let err = OrderRequest::market("BTCUSDT", Side::Sell, Decimal::ZERO).unwrap_err();
        assert_eq!(err, OrderValidationError::NonPositiveQuantity);
    }

    #[test]
    fn limit_requires_positive_price() {
        let err = OrderRequest::limit("BTCUSDT", Side::Buy, dec("1"), Decimal::ZERO).unwrap_err();
        assert_eq!(err, OrderValidationError::NonPositivePrice { field: "price" });

        let req = OrderRequest::limit("BTCUSDT", Side::Buy, dec("1"), dec("30000")).unwrap();
        assert_eq!(req.kind().price(), Some(dec("30000")));
        assert_eq!(req.kind().stop_price(), None);
        assert_eq!(req.kind().time_in_force(), Some(TimeInForce::Gtc));
    }

    #[test]
    fn stop_limit_checks_both_prices() {
        let err = OrderRequest::stop_limit("BTCUSDT", Side::Sell, dec("1"), dec("-1"), dec("2"))
            .unwrap_err();
        assert_eq!(err, OrderValidationError::NonPositivePrice { field: "stop price" });

        let req =
            OrderRequest::stop_limit("ETHUSDT", Side::Sell, dec("1"), dec("1900"), dec("1890"))
                .unwrap();
        assert_eq!(req.kind().order_type(), OrderType::StopLossLimit);
        assert_eq!(req.kind().stop_price(), Some(dec("1900")));
        assert_eq!(req.kind().price(), Some(dec("1890")));
    }

    #[test]
    fn record_from_query_response() {
        let json = r#"{
            "symbol": "BTCUSDT", "orderId": 28, "orderListId": -1,
            "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP", "price": "30000.00000000",
            "origQty": "0.01000000", "executedQty": "0.00000000",
            "cummulativeQuoteQty": "0.00000000", "status": "NEW",
            "timeInForce": "GTC", "type": "STOP_LOSS_LIMIT", "side": "SELL",
            "stopPrice": "30100.00000000", "icebergQty": "0.00000000",
            "time": 1507725176595, "updateTime": 1507725176595, "isWorking": false
        }"#;
        let rec: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.order_id, 28);
        assert_eq!(rec.side, Side::Sell);
        assert_eq!(rec.order_type, OrderType::StopLossLimit);
        assert_eq!(rec.price, Some(dec("30000")));
        assert_eq!(rec.stop_price, Some(dec("30100")));
        assert_eq!(rec.orig_qty, dec("0.01"));
        assert_eq!(rec.status, OrderStatus::New);
        assert_eq!(rec.time, Some(1507725176595));
        assert!(rec.created_at().is_some());
        assert_eq!(rec.updated_at(), rec.created_at());
    }

    #[test]
    fn record_placed_elsewhere_with_ioc() {
        let json = r#"{
            "symbol": "ETHUSDT", "orderId": 3, "clientOrderId": "web_1",
            "price": "1800.00", "origQty": "1.0", "executedQty": "0.4",
            "status": "EXPIRED", "timeInForce": "IOC", "type": "LIMIT",
            "side": "BUY", "time": 1700000000000, "updateTime": 1700000000123
        }"#;
        let rec: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.time_in_force, Some(TimeInForce::Ioc));
        assert_eq!(rec.executed_qty, Some(dec("0.4")));
        assert_eq!(rec.status, OrderStatus::Expired);
        assert_eq!(
            rec.updated_at().map(|t| t.timestamp_millis()),
            Some(1_700_000_000_123)
        );
    }

    #[test]
    fn record_from_market_result_response() {
        let json = r#"{
            "symbol": "BTCUSDT", "orderId": 7, "orderListId": -1,
            "clientOrderId": "x", "transactTime": 1700000000000,
            "price": "0.00000000", "origQty": "0.01000000",
            "executedQty": "0.01000000", "cummulativeQuoteQty": "350.12",
            "status": "FILLED", "timeInForce": "GTC", "type": "MARKET",
            "side": "BUY", "workingTime": 1700000000000,
            "selfTradePreventionMode": "EXPIRE_MAKER"
        }"#;
        let rec: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.symbol, "BTCUSDT");
        assert_eq!(rec.side, Side::Buy);
        assert_eq!(rec.price, None);
        assert_eq!(rec.stop_price, None);
        assert_eq!(rec.time, Some(1700000000000));
        assert_eq!(rec.status, OrderStatus::Filled);
    }
}
