//! # ob-core
//!
//! Core crate for the testnet order bot, providing:
//!
//! - **Types** (`types`) — side/type/status enums, order request and record, symbol helpers
//! - **Configuration** (`config`) — credentials from the environment, JSON config file
//! - **Error types** (`error`) — `ConfigError` and `OrderValidationError` via thiserror
//! - **Logging** (`logging`) — tracing-based console + file logging

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
