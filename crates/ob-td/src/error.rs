//! Errors returned by the trading side.
//!
//! [`RemoteApiError`] is anything the exchange (or the network in between)
//! reports. [`OrderError`] is what gateway order operations return: either
//! the order never left the process, or the exchange refused it.

use ob_core::error::OrderValidationError;
use serde::Deserialize;
use thiserror::Error;

/// Binance error code for an unknown symbol.
pub const CODE_INVALID_SYMBOL: i64 = -1121;
/// Binance error code for an order id that does not exist.
pub const CODE_ORDER_NOT_FOUND: i64 = -2013;

/// A failure reported by the trading API or its transport.
#[derive(Debug, Error)]
pub enum RemoteApiError {
    /// The exchange answered with its `{code, msg}` error body.
    #[error("APIError(code={code}): {msg}")]
    Api { status: u16, code: i64, msg: String },

    /// Non-success HTTP status with a body that is not an exchange error.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection, TLS, or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response that could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

impl RemoteApiError {
    /// Classify a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => Self::Api {
                status,
                code: err.code,
                msg: err.msg,
            },
            Err(_) => Self::Http {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Exchange error code, if the exchange supplied one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result of a gateway order operation that did not succeed.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] OrderValidationError),

    /// Sent, and the exchange or transport failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
}
