//! One-shot subcommands for scripted use.

use std::process::ExitCode;

use clap::Subcommand;
use ob_core::enums::Side;
use rust_decimal::Decimal;

use crate::action::ShellRequest;
use crate::context::AppContext;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the web form (default when no subcommand is given).
    Serve {
        /// Listen address, overrides `shell.bind`.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Check that a trading pair exists on the exchange.
    Validate { symbol: String },

    /// Place a market order.
    Market { symbol: String, side: Side, quantity: Decimal },

    /// Place a GTC limit order.
    Limit {
        symbol: String,
        side: Side,
        quantity: Decimal,
        price: Decimal,
    },

    /// Place a GTC stop-limit order.
    StopLimit {
        symbol: String,
        side: Side,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
    },

    /// Look up an order by id.
    Status { symbol: String, order_id: u64 },
}

impl Command {
    /// The request this command stands for. `None` for `serve`.
    pub fn into_request(self) -> Option<ShellRequest> {
        Some(match self {
            Self::Serve { .. } => return None,
            Self::Validate { symbol } => ShellRequest::Validate { symbol },
            Self::Market {
                symbol,
                side,
                quantity,
            } => ShellRequest::Market {
                symbol,
                side,
                quantity,
            },
            Self::Limit {
                symbol,
                side,
                quantity,
                price,
            } => ShellRequest::Limit {
                symbol,
                side,
                quantity,
                price,
            },
            Self::StopLimit {
                symbol,
                side,
                quantity,
                stop_price,
                limit_price,
            } => ShellRequest::StopLimit {
                symbol,
                side,
                quantity,
                stop_price,
                limit_price,
            },
            Self::Status { symbol, order_id } => ShellRequest::Status { symbol, order_id },
        })
    }
}

/// Execute one request and print the outcome.
pub async fn run(ctx: &AppContext, request: ShellRequest) -> ExitCode {
    let outcome = ctx.run(request).await;
    let text = render::outcome_text(&outcome);
    if outcome.is_success() {
        println!("{}", text.trim_end());
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", text.trim_end());
        ExitCode::FAILURE
    }
}
