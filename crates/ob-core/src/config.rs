//! Configuration loading.
//!
//! Two sources feed the process:
//!
//! 1. **Credentials** from the environment (`api_key`, `api_secret`). A `.env`
//!    file in the working directory is loaded first when present.
//! 2. An optional **JSON config file**. Every field has a default, so the file
//!    may be omitted entirely or list only the values that differ.
//!
//! # Example config
//!
//! ```json
//! {
//!   "binance": { "rest_url": "https://testnet.binance.vision", "recv_window": 5000 },
//!   "shell":   { "bind": "127.0.0.1:8501", "default_symbol": "BTCUSDT" },
//!   "log":     { "level": "info", "dir": ".", "file_name": "trading_bot.log" }
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "api_key";
/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "api_secret";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Exchange API credentials. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Load credentials from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv_loaded(dotenvy::dotenv().map(|_| ()))?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };
        Ok(Self {
            api_key: fetch(API_KEY_VAR)?,
            secret_key: fetch(API_SECRET_VAR)?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.api_key.chars().take(6).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format_args!("{shown}…"))
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// A missing `.env` file is normal; real env vars still apply. Anything else
/// (unreadable or malformed file) is reported.
fn dotenv_loaded(result: dotenvy::Result<()>) -> Result<(), ConfigError> {
    match result {
        Err(e) if e.not_found() => Ok(()),
        other => Ok(other?),
    }
}

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Top-level application config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub binance: BinanceConfig,
    pub shell: ShellConfig,
    pub log: LogConfig,
}

/// Exchange endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    /// Spot REST base URL. Defaults to the public spot testnet.
    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    /// `recvWindow` for signed requests (milliseconds).
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            recv_window: default_recv_window(),
        }
    }
}

/// Web form settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// Listen address for `serve`.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Pre-filled value of the symbol input.
    #[serde(default = "default_symbol")]
    pub default_symbol: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            default_symbol: default_symbol(),
        }
    }
}

/// Log sink settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory of the log file. `None` disables the file sink.
    #[serde(default = "default_log_dir")]
    pub dir: Option<String>,

    #[serde(default = "default_log_file")]
    pub file_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
            file_name: default_log_file(),
        }
    }
}

/// Load and parse a JSON config file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Defaults (used by serde)
// ---------------------------------------------------------------------------

fn default_rest_url() -> String {
    "https://testnet.binance.vision".into()
}

fn default_recv_window() -> u64 {
    5000
}

fn default_bind() -> String {
    "127.0.0.1:8501".into()
}

fn default_symbol() -> String {
    "BTCUSDT".into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_dir() -> Option<String> {
    Some(".".into())
}

fn default_log_file() -> String {
    "trading_bot.log".into()
}
