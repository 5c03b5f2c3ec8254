//! HTML and plain-text rendering.
//!
//! The page is a single server-rendered form; no scripts are required beyond
//! auto-submitting the action selector.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use ob_core::order::OrderRecord;

use crate::action::{Action, Outcome};
use crate::form::FormInput;

const TITLE: &str = "Binance Testnet Trading Bot";

/// Labelled order fields in display order.
pub fn order_details(record: &OrderRecord) -> Vec<(&'static str, String)> {
    let or_na = |v: Option<String>| v.unwrap_or_else(|| "N/A".to_string());
    vec![
        ("Symbol", record.symbol.clone()),
        ("Order ID", record.order_id.to_string()),
        ("Side", record.side.to_string()),
        ("Type", record.order_type.to_string()),
        ("Quantity", record.orig_qty.normalize().to_string()),
        ("Price", or_na(record.price.map(|p| p.normalize().to_string()))),
        ("Stop Price", or_na(record.stop_price.map(|p| p.normalize().to_string()))),
        ("Status", record.status.to_string()),
        ("Time", or_na(record.created_at().map(timestamp))),
        ("Last Update", or_na(record.updated_at().map(timestamp))),
    ]
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string()
}

/// Plain-text rendering for the CLI.
pub fn outcome_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::SymbolChecked { symbol, valid: true } => format!("Symbol {symbol} is valid."),
        Outcome::SymbolChecked { symbol, valid: false } => format!("Invalid symbol: {symbol}"),
        Outcome::Failed(msg) => msg.clone(),
        Outcome::Order { headline, record } => {
            let mut out = format!("{headline}\nOrder Details:\n");
            for (label, value) in order_details(record) {
                let _ = writeln!(out, "- {label}: {value}");
            }
            out
        }
    }
}

/// Render the whole page for `action`, keeping the user's previous input.
pub fn page(action: Action, input: &FormInput, outcome: Option<&Outcome>) -> String {
    let mut body = String::new();

    // Action selector.
    let _ = write!(
        body,
        r#"<form method="get" action="/" class="selector"><label>Select Action <select name="action" onchange="this.form.submit()">"#
    );
    for a in Action::ALL {
        let selected = if a == action { " selected" } else { "" };
        let _ = write!(body, r#"<option value="{}"{selected}>{}</option>"#, a.slug(), a.label());
    }
    body.push_str(r#"</select></label><noscript><button type="submit">Switch</button></noscript></form>"#);

    // Main form.
    let _ = write!(
        body,
        r#"<form method="post" action="/"><input type="hidden" name="action" value="{}">"#,
        action.slug()
    );
    let _ = write!(
        body,
        r#"<label>Trading Pair (e.g., BTCUSDT) <input type="text" name="symbol" value="{}"></label>"#,
        escape(&input.symbol)
    );

    if action.places_order() {
        let side = input.side.as_deref().unwrap_or("BUY").to_ascii_uppercase();
        body.push_str(r#"<label>Order Side <select name="side">"#);
        for s in ["BUY", "SELL"] {
            let selected = if s == side { " selected" } else { "" };
            let _ = write!(body, r#"<option value="{s}"{selected}>{s}</option>"#);
        }
        body.push_str("</select></label>");
        number_input(&mut body, "Quantity", "quantity", "0.001", input.quantity.as_deref());
    }
    match action {
        Action::Limit => {
            number_input(&mut body, "Limit Price", "limit_price", "0.01", input.limit_price.as_deref());
        }
        Action::StopLimit => {
            number_input(&mut body, "Stop Price", "stop_price", "0.01", input.stop_price.as_deref());
            number_input(&mut body, "Limit Price", "limit_price", "0.01", input.limit_price.as_deref());
        }
        Action::Status => {
            let _ = write!(
                body,
                r#"<label>Order ID <input type="text" name="order_id" value="{}"></label>"#,
                escape(input.order_id.as_deref().unwrap_or(""))
            );
        }
        Action::Market => {}
    }

    let submit = match action {
        Action::Status => "Check Status",
        other => other.label(),
    };
    let _ = write!(
        body,
        r#"<div class="buttons"><button type="submit" name="op" value="validate">Validate Symbol</button><button type="submit" name="op" value="submit">{submit}</button></div></form>"#
    );

    if let Some(outcome) = outcome {
        body.push_str(&outcome_html(outcome));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
label {{ display: block; margin: 0.5rem 0; }}
.success {{ background: #e6f4ea; padding: 0.5rem; }}
.error {{ background: #fce8e6; padding: 0.5rem; }}
</style>
</head>
<body>
<h1>{TITLE}</h1>
<p>Trade on the Binance Spot Testnet with Market, Limit, and Stop-Limit orders.</p>
{body}
</body>
</html>
"#
    )
}

fn number_input(out: &mut String, label: &str, name: &str, step: &str, value: Option<&str>) {
    let _ = write!(
        out,
        r#"<label>{label} <input type="number" name="{name}" min="0" step="{step}" value="{}"></label>"#,
        escape(value.unwrap_or(""))
    );
}

fn outcome_html(outcome: &Outcome) -> String {
    match outcome {
        Outcome::SymbolChecked { symbol, valid: true } => {
            format!(r#"<p class="success">Symbol {} is valid.</p>"#, escape(symbol))
        }
        Outcome::SymbolChecked { symbol, valid: false } => {
            format!(r#"<p class="error">Invalid symbol: {}</p>"#, escape(symbol))
        }
        Outcome::Failed(msg) => format!(r#"<p class="error">{}</p>"#, escape(msg)),
        Outcome::Order { headline, record } => {
            let mut out = format!(
                r#"<p class="success">{}</p><p><strong>Order Details:</strong></p><ul class="details">"#,
                escape(headline)
            );
            for (label, value) in order_details(record) {
                let _ = write!(out, "<li>{label}: {}</li>", escape(&value));
            }
            out.push_str("</ul>");
            out
        }
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ob_core::enums::{OrderStatus, OrderType, Side};
    use rust_decimal::Decimal;

    use super::*;

    fn record() -> OrderRecord {
        OrderRecord {
            symbol: "BTCUSDT".into(),
            order_id: 99,
            client_order_id: String::new(),
            side: Side::Buy,
            order_type: OrderType::Market,
            time_in_force: None,
            orig_qty: Decimal::from_str("0.01000000").unwrap(),
            executed_qty: None,
            price: None,
            stop_price: None,
            status: OrderStatus::Filled,
            time: Some(1_700_000_000_000),
            update_time: None,
        }
    }

    #[test]
    fn details_use_na_for_missing_prices() {
        let details = order_details(&record());
        assert_eq!(details[0], ("Symbol", "BTCUSDT".to_string()));
        assert_eq!(details[4], ("Quantity", "0.01".to_string()));
        assert_eq!(details[5], ("Price", "N/A".to_string()));
        assert_eq!(details[6], ("Stop Price", "N/A".to_string()));
        assert_eq!(details[8], ("Time", "2023-11-14 22:13:20.000 UTC".to_string()));
        assert_eq!(details[9], ("Last Update", "N/A".to_string()));
    }

    #[test]
    fn status_details_show_last_update() {
        let mut rec = record();
        rec.update_time = Some(1_700_000_060_500);
        let details = order_details(&rec);
        assert_eq!(details[9], ("Last Update", "2023-11-14 22:14:20.500 UTC".to_string()));
    }

    #[test]
    fn text_outcome_lists_fields() {
        let text = outcome_text(&Outcome::Order {
            headline: "Market order placed successfully!",
            record: record(),
        });
        assert!(text.starts_with("Market order placed successfully!\n"));
        assert!(text.contains("- Order ID: 99\n"));
        assert!(text.contains("- Status: FILLED\n"));
    }

    #[test]
    fn escapes_user_input() {
        assert_eq!(escape(r#"<b>"x" & 'y'</b>"#), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
        let input = FormInput {
            symbol: "<script>".into(),
            ..Default::default()
        };
        let html = page(Action::Market, &input, Some(&Outcome::Failed("Error: <bad>".into())));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Error: &lt;bad&gt;"));
    }

    #[test]
    fn fields_depend_on_action() {
        let input = FormInput::default();
        let market = page(Action::Market, &input, None);
        assert!(market.contains(r#"name="quantity""#));
        assert!(!market.contains(r#"name="limit_price""#));

        let stop = page(Action::StopLimit, &input, None);
        assert!(stop.contains(r#"name="stop_price""#));
        assert!(stop.contains(r#"name="limit_price""#));

        let status = page(Action::Status, &input, None);
        assert!(status.contains(r#"name="order_id""#));
        assert!(!status.contains(r#"name="quantity""#));
        assert!(!status.contains(r#"name="side""#));
        assert!(status.contains(r#"<option value="status" selected>"#));
    }
}
