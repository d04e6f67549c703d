//! Market data provider seam.
//!
//! The state manager only talks to this trait. `MarketClient` implements it
//! over HTTP; tests and alternative backends supply their own.

use crate::domain::token::{Token, TokenStub};
use crate::error::PortfolioError;
use crate::shared::TokenId;
use async_trait::async_trait;

/// Bulk listing, by-id lookup, search and trending queries.
///
/// Implementations return at most 10 search hits and 6 trending entries;
/// the state manager truncates again regardless.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider {
    /// Full market listing, sorted by market cap descending.
    async fn markets(&self) -> Result<Vec<Token>, PortfolioError>;

    /// Market rows for the given ids (same schema as `markets`).
    async fn markets_by_ids(&self, ids: &[TokenId]) -> Result<Vec<Token>, PortfolioError>;

    /// Search hits ranked by provider relevance.
    async fn search(&self, query: &str) -> Result<Vec<TokenStub>, PortfolioError>;

    /// Trending tokens in provider order.
    async fn trending(&self) -> Result<Vec<TokenStub>, PortfolioError>;
}

#[cfg(feature = "http")]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for crate::client::MarketClient {
    async fn markets(&self) -> Result<Vec<Token>, PortfolioError> {
        self.tokens().markets().await
    }

    async fn markets_by_ids(&self, ids: &[TokenId]) -> Result<Vec<Token>, PortfolioError> {
        self.tokens().by_ids(ids).await
    }

    async fn search(&self, query: &str) -> Result<Vec<TokenStub>, PortfolioError> {
        self.tokens().search(query).await
    }

    async fn trending(&self) -> Result<Vec<TokenStub>, PortfolioError> {
        self.tokens().trending().await
    }
}
