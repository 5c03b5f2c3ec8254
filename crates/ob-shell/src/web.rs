//! Web form front-end.
//!
//! | Route    | Method | Purpose                                  |
//! |----------|--------|------------------------------------------|
//! | `/`      | GET    | render the form (`?action=` selects it)  |
//! | `/`      | POST   | validate a symbol or submit the action   |

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Form, Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tracing::info;

use crate::action::{Action, Outcome};
use crate::context::AppContext;
use crate::form::FormInput;
use crate::render;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub action: Action,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new().route("/", get(show).post(submit)).with_state(ctx)
}

/// Bind and serve until Ctrl+C.
pub async fn serve(ctx: Arc<AppContext>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("cannot bind {bind}"))?;
    info!("[shell] web form listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("[shell] shutdown signal received");
        })
        .await?;
    Ok(())
}

pub async fn show(State(ctx): State<Arc<AppContext>>, Query(q): Query<PageQuery>) -> Html<String> {
    let input = FormInput {
        action: q.action,
        symbol: ctx.config.shell.default_symbol.clone(),
        ..Default::default()
    };
    Html(render::page(q.action, &input, None))
}

pub async fn submit(State(ctx): State<Arc<AppContext>>, Form(input): Form<FormInput>) -> Html<String> {
    let outcome = match input.parse() {
        Ok(request) => ctx.run(request).await,
        Err(e) => {
            info!("[shell] input rejected: {e}");
            Outcome::Failed(format!("Error: {e}"))
        }
    };
    Html(render::page(input.action, &input, Some(&outcome)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use ob_core::config::AppConfig;
    use ob_core::enums::OrderStatus;
    use ob_core::order::{OrderRecord, OrderRequest, SymbolInfo};
    use ob_td::{OrderGateway, RemoteApiError, SpotApi};

    use super::*;

    /// Knows BTCUSDT and order 7; everything else is rejected.
    struct FakeSpot {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SpotApi for FakeSpot {
        async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, RemoteApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((symbol == "BTCUSDT").then(|| SymbolInfo {
                symbol: symbol.into(),
                status: "TRADING".into(),
                base_asset: "BTC".into(),
                quote_asset: "USDT".into(),
            }))
        }

        async fn new_order(&self, order: &OrderRequest) -> Result<OrderRecord, RemoteApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OrderRecord {
                symbol: order.symbol().into(),
                order_id: 7,
                client_order_id: String::new(),
                side: order.side(),
                order_type: order.kind().order_type(),
                time_in_force: order.kind().time_in_force(),
                orig_qty: order.quantity(),
                executed_qty: None,
                price: order.kind().price(),
                stop_price: order.kind().stop_price(),
                status: OrderStatus::New,
                time: Some(1_700_000_000_000),
                update_time: None,
            })
        }

        async fn query_order(&self, _symbol: &str, _order_id: u64) -> Result<OrderRecord, RemoteApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RemoteApiError::Api {
                status: 400,
                code: -2013,
                msg: "Order does not exist.".into(),
            })
        }
    }

    fn context() -> (Arc<AppContext>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = OrderGateway::new(FakeSpot {
            calls: Arc::clone(&calls),
        });
        (Arc::new(AppContext::with_gateway(AppConfig::default(), gateway)), calls)
    }

    fn form(action: Action) -> FormInput {
        FormInput {
            action,
            symbol: "btcusdt".into(),
            side: Some("BUY".into()),
            quantity: Some("0.01".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn show_prefills_default_symbol() {
        let (ctx, _) = context();
        let Html(html) = show(State(ctx), Query(PageQuery::default())).await;
        assert!(html.contains(r#"value="BTCUSDT""#));
        assert!(html.contains("Place Market Order"));
    }

    #[tokio::test]
    async fn limit_order_shows_details() {
        let (ctx, _) = context();
        let mut input = form(Action::Limit);
        input.limit_price = Some("30000".into());
        let Html(html) = submit(State(ctx), Form(input)).await;
        assert!(html.contains("Limit order placed successfully!"));
        assert!(html.contains("<li>Symbol: BTCUSDT</li>"));
        assert!(html.contains("<li>Price: 30000</li>"));
        assert!(html.contains("<li>Stop Price: N/A</li>"));
    }

    #[tokio::test]
    async fn missing_price_never_reaches_gateway() {
        let (ctx, calls) = context();
        let Html(html) = submit(State(ctx), Form(form(Action::Limit))).await;
        assert!(html.contains("Error: limit price is required"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_side_never_reaches_gateway() {
        let (ctx, calls) = context();
        let mut input = form(Action::Market);
        input.side = None;
        let Html(html) = submit(State(ctx), Form(input)).await;
        assert!(html.contains("Error: side is required"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_order_renders_error() {
        let (ctx, _) = context();
        let input = FormInput {
            action: Action::Status,
            symbol: "BTCUSDT".into(),
            order_id: Some("123".into()),
            ..Default::default()
        };
        let Html(html) = submit(State(ctx), Form(input)).await;
        assert!(html.contains("Error: APIError(code=-2013): Order does not exist."));
    }

    #[tokio::test]
    async fn validate_button() {
        let (ctx, _) = context();
        let mut input = form(Action::Market);
        input.op = crate::form::Op::Validate;
        let Html(html) = submit(State(Arc::clone(&ctx)), Form(input.clone())).await;
        assert!(html.contains("Symbol BTCUSDT is valid."));

        input.symbol = "nopeusdt".into();
        let Html(html) = submit(State(ctx), Form(input)).await;
        assert!(html.contains("Invalid symbol: NOPEUSDT"));
    }

    #[tokio::test]
    async fn non_positive_price_is_rejected_by_gateway() {
        let (ctx, calls) = context();
        let mut input = form(Action::StopLimit);
        input.stop_price = Some("0".into());
        input.limit_price = Some("100".into());
        let Html(html) = submit(State(ctx), Form(input)).await;
        assert!(html.contains("Error: stop price must be greater than zero"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
