//! Conversions from wire types to domain types for tokens.

use super::wire::{CoinMarketResponse, SearchCoinResponse, TrendingCoinResponse};
use super::{Sparkline, Token, TokenStub};
use crate::shared::TokenId;
use rust_decimal::Decimal;

impl From<CoinMarketResponse> for Token {
    fn from(c: CoinMarketResponse) -> Self {
        Self {
            id: TokenId::from(c.id),
            symbol: c.symbol,
            name: c.name,
            image: c.image.unwrap_or_default(),
            current_price: c.current_price.unwrap_or_default(),
            market_cap: c.market_cap.unwrap_or_default(),
            market_cap_rank: c.market_cap_rank.unwrap_or_default(),
            price_change_percentage_24h: c.price_change_percentage_24h.unwrap_or_default(),
            sparkline_in_7d: c
                .sparkline_in_7d
                .map(|s| Sparkline::new(s.price))
                .unwrap_or_default(),
        }
    }
}

impl From<SearchCoinResponse> for TokenStub {
    fn from(c: SearchCoinResponse) -> Self {
        Self {
            id: TokenId::from(c.id),
            symbol: c.symbol,
            name: c.name,
            thumb: c.thumb.unwrap_or_default(),
            market_cap_rank: c.market_cap_rank,
        }
    }
}

impl From<TrendingCoinResponse> for TokenStub {
    fn from(c: TrendingCoinResponse) -> Self {
        c.item.into()
    }
}

/// A stub promoted to a catalog-shaped token: price fields zeroed, sparkline empty.
impl From<&TokenStub> for Token {
    fn from(s: &TokenStub) -> Self {
        Self {
            id: s.id.clone(),
            symbol: s.symbol.clone(),
            name: s.name.clone(),
            image: s.thumb.clone(),
            current_price: Decimal::ZERO,
            market_cap: Decimal::ZERO,
            market_cap_rank: s.market_cap_rank.unwrap_or_default(),
            price_change_percentage_24h: Decimal::ZERO,
            sparkline_in_7d: Sparkline::default(),
        }
    }
}
