//! # ob-td
//!
//! Order placement against a cryptocurrency exchange's test network.
//!
//! [`OrderGateway`] is the single point of contact the shell talks to. It
//! reaches the exchange through the [`SpotApi`] trait, implemented by
//! [`binance::SpotClient`] for real traffic and by in-memory fakes in tests.

pub mod binance;
pub mod error;
pub mod gateway;

use async_trait::async_trait;
use ob_core::order::{OrderRecord, OrderRequest, SymbolInfo};

pub use error::{OrderError, RemoteApiError};
pub use gateway::OrderGateway;

/// Remote calls the gateway needs from an exchange.
///
/// Every method performs exactly one request and returns what the exchange
/// said. No retries, no caching.
#[async_trait]
pub trait SpotApi: Send + Sync {
    /// Metadata for `symbol`, or `None` if the exchange does not list it.
    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, RemoteApiError>;

    /// Submit a validated order.
    async fn new_order(&self, order: &OrderRequest) -> Result<OrderRecord, RemoteApiError>;

    /// Current state of a previously placed order.
    async fn query_order(&self, symbol: &str, order_id: u64) -> Result<OrderRecord, RemoteApiError>;
}
