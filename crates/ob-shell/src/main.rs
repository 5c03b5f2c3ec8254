//! # ob-shell
//!
//! Entry point for the testnet order bot.
//!
//! Without a subcommand it serves the web form; the remaining subcommands run
//! a single action and exit.
//!
//! # Usage
//!
//! ```bash
//! ob-shell                                   # web form on shell.bind
//! ob-shell --config bot.json serve --bind 0.0.0.0:8501
//! ob-shell limit BTCUSDT BUY 0.01 30000
//! ob-shell status BTCUSDT 123456
//! ```
//!
//! Credentials come from the `api_key` / `api_secret` environment variables
//! (or a `.env` file).

mod action;
mod cli;
mod context;
mod form;
mod render;
mod web;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use ob_core::config::{AppConfig, load_config};
use ob_core::logging::init_logging;
use tracing::{error, info};

use crate::cli::Command;
use crate::context::AppContext;

/// Binance Spot Testnet order bot.
#[derive(Parser)]
#[command(name = "ob-shell", about = "Binance Spot Testnet order bot")]
struct Cli {
    /// Configuration file path (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Directory for the log file.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Configuration
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log.dir = Some(dir);
    }

    // 2. Logging; the guard flushes the file sink on drop.
    let _guard = init_logging(&config.log)?;
    info!(
        "[shell] starting — rest_url={}, log_level={}",
        config.binance.rest_url, config.log.level
    );

    // 3. Credentials and gateway
    let ctx = match AppContext::init(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("[shell] startup failed: {e}");
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(2));
        }
    };

    // 4. Dispatch
    let command = cli.command.unwrap_or(Command::Serve { bind: None });
    match command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| ctx.config.shell.bind.clone());
            web::serve(Arc::new(ctx), &bind).await?;
            info!("[shell] stopped");
            Ok(ExitCode::SUCCESS)
        }
        other => match other.into_request() {
            Some(request) => Ok(cli::run(&ctx, request).await),
            None => Ok(ExitCode::SUCCESS),
        },
    }
}
