//! Binance Spot trading.
//!
//! ```text
//! SpotClient  (REST, HMAC-SHA256 signed)
//! └── auth    (query signing)
//! ```
//!
//! The default base URL points at the spot test network
//! (`https://testnet.binance.vision`); see
//! [`BinanceConfig`](ob_core::config::BinanceConfig).

pub mod auth;
pub mod spot;

pub use spot::SpotClient;
