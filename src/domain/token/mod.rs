//! Token domain — catalog entries, search/trending stubs, sparklines.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::fmt::decimal::{abbr_number, signed_percent, usd};
use crate::shared::TokenId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Token ───────────────────────────────────────────────────────────────────

/// A catalog entry from the bulk market listing (or a by-id lookup).
///
/// Field names follow the provider's snake_case schema so that persisted
/// watchlist entries keep the same JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub current_price: Decimal,
    #[serde(default)]
    pub market_cap: Decimal,
    #[serde(default)]
    pub market_cap_rank: u32,
    #[serde(default)]
    pub price_change_percentage_24h: Decimal,
    #[serde(default)]
    pub sparkline_in_7d: Sparkline,
}

impl Token {
    /// Whether the entry carries everything needed to appear in a watchlist.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty() && !self.symbol.is_empty()
    }

    /// Non-negative 24h change; drives the sparkline colour.
    pub fn is_up_24h(&self) -> bool {
        !self.price_change_percentage_24h.is_sign_negative()
            || self.price_change_percentage_24h.is_zero()
    }

    /// `"Bitcoin (BTC)"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }

    /// `"$50,123.45"`.
    pub fn price_label(&self) -> String {
        usd(&self.current_price)
    }

    /// `"+1.23%"`.
    pub fn change_label(&self) -> String {
        signed_percent(&self.price_change_percentage_24h)
    }

    /// `"$1.32T"`.
    pub fn market_cap_label(&self) -> String {
        format!("${}", abbr_number(&self.market_cap, 2))
    }
}

// ─── Sparkline ───────────────────────────────────────────────────────────────

/// 7-day price samples, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl Sparkline {
    pub fn new(price: Vec<f64>) -> Self {
        Self { price }
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_empty()
    }

    pub fn len(&self) -> usize {
        self.price.len()
    }

    /// `(min, max)` of the series, for chart scaling.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.price
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

// ─── TokenStub ───────────────────────────────────────────────────────────────

/// Lightweight token reference returned by search and trending queries.
///
/// Carries no price data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStub {
    pub id: TokenId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}
