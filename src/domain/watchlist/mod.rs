//! Watchlist domain — tracked tokens with user-entered holdings.

pub mod resolve;
pub mod state;

use crate::domain::token::Token;
use crate::shared::fmt::decimal::{quantity, usd};
use crate::shared::{clamp_holdings, TokenId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use resolve::{TokenResolver, TokenSource};
pub use state::{AddReport, Watchlist};

/// A tracked token plus the user's holdings.
///
/// `value` is the last stored `holdings × current_price`; readers that need
/// a value guaranteed fresh use [`WatchlistEntry::position_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    #[serde(flatten)]
    pub token: Token,
    #[serde(default)]
    pub holdings: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
}

impl WatchlistEntry {
    /// A fresh entry with zero holdings.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            holdings: Decimal::ZERO,
            value: None,
        }
    }

    pub fn id(&self) -> &TokenId {
        &self.token.id
    }

    /// `holdings × current_price`, computed now. Saturates instead of overflowing.
    pub fn position_value(&self) -> Decimal {
        self.holdings.saturating_mul(self.token.current_price)
    }

    /// Set holdings (negative input clamps to zero) and recompute `value`.
    pub fn set_holdings(&mut self, holdings: Decimal) {
        self.holdings = clamp_holdings(holdings);
        self.value = Some(self.position_value());
    }

    /// Holdings with four decimals.
    pub fn holdings_label(&self) -> String {
        quantity(&self.holdings)
    }

    pub fn value_label(&self) -> String {
        usd(&self.position_value())
    }

    /// Overwrite price-derived fields from a fresh market row.
    ///
    /// Holdings are untouched. `value` is recomputed when holdings are
    /// non-zero and cleared otherwise.
    pub fn apply_price(&mut self, fresh: &Token) {
        self.token.current_price = fresh.current_price;
        self.token.price_change_percentage_24h = fresh.price_change_percentage_24h;
        self.token.sparkline_in_7d = fresh.sparkline_in_7d.clone();
        self.value = if self.holdings.is_zero() {
            None
        } else {
            Some(self.position_value())
        };
    }
}
