//! Wire types for market-data responses (REST).
//!
//! Field names match the CoinGecko v3 API. Numeric fields the provider may
//! send as `null` are optional here and defaulted during conversion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── /coins/markets ─────────────────────────────────────────────────────────

/// One row of the `/coins/markets` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(default)]
    pub sparkline_in_7d: Option<SparklineResponse>,
}

/// 7-day sparkline samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparklineResponse {
    #[serde(default)]
    pub price: Vec<f64>,
}

// ─── /search ────────────────────────────────────────────────────────────────

/// REST response for `/search?query=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<SearchCoinResponse>,
}

/// A coin hit from `/search`. Also the shape of a trending `item`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCoinResponse {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

// ─── /search/trending ───────────────────────────────────────────────────────

/// REST response for `/search/trending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub coins: Vec<TrendingCoinResponse>,
}

/// Trending wrapper: the coin stub lives under `item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoinResponse {
    pub item: SearchCoinResponse,
}
