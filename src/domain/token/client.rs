//! Tokens sub-client — market listing, by-id lookup, search, trending.

use crate::client::MarketClient;
use crate::domain::token::{Token, TokenStub};
use crate::error::PortfolioError;
use crate::network::{SEARCH_LIMIT, TRENDING_LIMIT};
use crate::shared::TokenId;

/// Sub-client for token queries.
pub struct Tokens<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Tokens<'a> {
    /// Top tokens by market cap, provider order preserved.
    pub async fn markets(&self) -> Result<Vec<Token>, PortfolioError> {
        let resp = self.client.http.get_markets(None).await?;
        Ok(resp.into_iter().map(Token::from).collect())
    }

    /// Market rows for the given ids. An empty id set issues no request.
    pub async fn by_ids(&self, ids: &[TokenId]) -> Result<Vec<Token>, PortfolioError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let resp = self.client.http.get_markets(Some(ids)).await?;
        Ok(resp.into_iter().map(Token::from).collect())
    }

    /// Up to 10 search hits, ranked as the provider returns them.
    pub async fn search(&self, query: &str) -> Result<Vec<TokenStub>, PortfolioError> {
        let resp = self.client.http.search(query).await?;
        Ok(resp
            .coins
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(TokenStub::from)
            .collect())
    }

    /// Up to 6 trending tokens in provider order.
    pub async fn trending(&self) -> Result<Vec<TokenStub>, PortfolioError> {
        let resp = self.client.http.get_trending().await?;
        Ok(resp
            .coins
            .into_iter()
            .take(TRENDING_LIMIT)
            .map(TokenStub::from)
            .collect())
    }
}
