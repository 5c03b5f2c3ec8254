//! What the user asked for, and what came back.
//!
//! Both front-ends (web form and CLI) turn their input into a
//! [`ShellRequest`], run it through [`execute`], and render the [`Outcome`].

use ob_core::enums::Side;
use ob_core::order::OrderRecord;
use ob_td::OrderGateway;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// The four actions offered by the selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Market,
    Limit,
    StopLimit,
    Status,
}

impl Action {
    pub const ALL: [Action; 4] = [Self::Market, Self::Limit, Self::StopLimit, Self::Status];

    pub fn label(self) -> &'static str {
        match self {
            Self::Market => "Place Market Order",
            Self::Limit => "Place Limit Order",
            Self::StopLimit => "Place Stop-Limit Order",
            Self::Status => "Check Order Status",
        }
    }

    /// Form value, matching the serde name.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::StopLimit => "stop_limit",
            Self::Status => "status",
        }
    }

    pub fn places_order(self) -> bool {
        self != Self::Status
    }
}

/// A fully parsed user request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellRequest {
    Validate {
        symbol: String,
    },
    Market {
        symbol: String,
        side: Side,
        quantity: Decimal,
    },
    Limit {
        symbol: String,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    },
    StopLimit {
        symbol: String,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    },
    Status {
        symbol: String,
        order_id: u64,
    },
}

/// Result of one user action, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    SymbolChecked { symbol: String, valid: bool },
    Order { headline: &'static str, record: OrderRecord },
    Failed(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::SymbolChecked { valid, .. } => *valid,
            Self::Order { .. } => true,
            Self::Failed(_) => false,
        }
    }
}

/// Run one request against the gateway.
///
/// Gateway errors become [`Outcome::Failed`]; the gateway has already logged
/// them.
pub async fn execute(gateway: &OrderGateway, request: ShellRequest) -> Outcome {
    info!("[shell] executing {request:?}");
    let (headline, result) = match request {
        ShellRequest::Validate { symbol } => {
            let valid = gateway.validate_symbol(&symbol).await;
            return Outcome::SymbolChecked { symbol, valid };
        }
        ShellRequest::Market {
            symbol,
            side,
            quantity,
        } => (
            "Market order placed successfully!",
            gateway.place_market_order(&symbol, side, quantity).await,
        ),
        ShellRequest::Limit {
            symbol,
            side,
            quantity,
            price,
        } => (
            "Limit order placed successfully!",
            gateway.place_limit_order(&symbol, side, quantity, price).await,
        ),
        ShellRequest::StopLimit {
            symbol,
            side,
            quantity,
            stop_price,
            limit_price,
        } => (
            "Stop-Limit order placed successfully!",
            gateway
                .place_stop_limit_order(&symbol, side, quantity, stop_price, limit_price)
                .await,
        ),
        ShellRequest::Status { symbol, order_id } => (
            "Order status retrieved!",
            gateway.get_order_status(&symbol, order_id).await,
        ),
    };

    match result {
        Ok(record) => Outcome::Order { headline, record },
        Err(e) => Outcome::Failed(format!("Error: {e}")),
    }
}
