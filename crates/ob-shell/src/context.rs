//! Process-wide context, built once in `main` and shared by reference.

use ob_core::config::{AppConfig, Credentials};
use ob_core::error::ConfigError;
use ob_td::OrderGateway;
use tokio::sync::Mutex;

use crate::action::{Outcome, ShellRequest, execute};

pub struct AppContext {
    pub config: AppConfig,
    gateway: OrderGateway,
    /// Held for the duration of each gateway call so that at most one remote
    /// request is outstanding.
    in_flight: Mutex<()>,
}

impl AppContext {
    /// Load credentials from the environment and connect the gateway.
    pub fn init(config: AppConfig) -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        let gateway = OrderGateway::binance(credentials, &config.binance);
        Ok(Self::with_gateway(config, gateway))
    }

    pub fn with_gateway(config: AppConfig, gateway: OrderGateway) -> Self {
        Self {
            config,
            gateway,
            in_flight: Mutex::new(()),
        }
    }

    /// Run one request, waiting for any call already in progress.
    pub async fn run(&self, request: ShellRequest) -> Outcome {
        let _permit = self.in_flight.lock().await;
        execute(&self.gateway, request).await
    }
}
