//! Typed error definitions shared by every crate in the workspace.
//!
//! [`ConfigError`] covers anything that stops the process from starting
//! (missing credentials, unreadable config, logging already initialised).
//! [`OrderValidationError`] is raised while building an
//! [`OrderRequest`](crate::order::OrderRequest), before any network I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration errors. All variants are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential environment variable is unset or empty.
    #[error("missing credential: set `{0}` in the environment or a .env file")]
    MissingCredential(&'static str),

    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`AppConfig`](crate::config::AppConfig).
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `.env` file exists but could not be parsed.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// The tracing subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Logging(String),
}

/// Local order validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("{field} must be greater than zero")]
    NonPositivePrice { field: &'static str },
}
