//! Web form input and its parsing into a [`ShellRequest`].
//!
//! Everything arrives as text. Fields that do not apply to the selected action
//! are ignored, so a status check never looks at `quantity`.

use std::str::FromStr;

use ob_core::enums::Side;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::action::{Action, ShellRequest};

/// Which button submitted the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Validate,
    #[default]
    Submit,
}

/// Raw form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub op: Op,
    #[serde(default)]
    pub symbol: String,
    pub side: Option<String>,
    pub quantity: Option<String>,
    pub stop_price: Option<String>,
    pub limit_price: Option<String>,
    pub order_id: Option<String>,
}

/// User input problems, reported without contacting the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} is not a number: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("order id must be a whole number: {0}")]
    InvalidOrderId(String),

    #[error("{0}")]
    Side(String),
}

impl FormInput {
    /// Parse the fields relevant to the chosen action and button.
    pub fn parse(&self) -> Result<ShellRequest, InputError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(InputError::Missing("symbol"));
        }

        if self.op == Op::Validate {
            return Ok(ShellRequest::Validate { symbol });
        }

        let placing = match self.action {
            Action::Status => {
                let raw = required(&self.order_id, "order id")?;
                let order_id = raw
                    .parse::<u64>()
                    .map_err(|_| InputError::InvalidOrderId(raw.to_string()))?;
                return Ok(ShellRequest::Status { symbol, order_id });
            }
            placing => placing,
        };

        let side = Side::from_str(required(&self.side, "side")?).map_err(InputError::Side)?;
        let quantity = decimal(&self.quantity, "quantity")?;
        if quantity <= Decimal::ZERO {
            return Err(InputError::NotPositive("quantity"));
        }

        Ok(match placing {
            Action::Limit => ShellRequest::Limit {
                symbol,
                side,
                quantity,
                price: decimal(&self.limit_price, "limit price")?,
            },
            Action::StopLimit => ShellRequest::StopLimit {
                symbol,
                side,
                quantity,
                stop_price: decimal(&self.stop_price, "stop price")?,
                limit_price: decimal(&self.limit_price, "limit price")?,
            },
            _ => ShellRequest::Market {
                symbol,
                side,
                quantity,
            },
        })
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, InputError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::Missing(name))
}

fn decimal(field: &Option<String>, name: &'static str) -> Result<Decimal, InputError> {
    let raw = required(field, name)?;
    Decimal::from_str(raw).map_err(|_| InputError::NotANumber {
        field: name,
        value: raw.to_string(),
    })
}
