//! Low-level HTTP client — `MarketHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the token sub-client). No retries: a failed request surfaces
//! immediately and the next user-triggered command is the only retry.

use crate::domain::token::wire::{CoinMarketResponse, SearchResponse, TrendingResponse};
use crate::error::HttpError;
use crate::network::{API_KEY_HEADER, MARKETS_PAGE_SIZE, VS_CURRENCY};
use crate::shared::TokenId;

use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko-compatible REST API.
pub struct MarketHttp {
    base_url: String,
    client: Client,
    /// Demo/pro API key. Sent as a header, never logged.
    api_key: Option<String>,
}

impl MarketHttp {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, HttpError> {
        Self::with_client(base_url, api_key, Client::builder())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        let builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10);
        Self::with_client(base_url, api_key, builder)
    }

    fn with_client(
        base_url: &str,
        api_key: Option<String>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, HttpError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Markets ──────────────────────────────────────────────────────────

    /// `/coins/markets`, optionally filtered to `ids`.
    ///
    /// Sorted by market cap descending, one page of up to 100 rows, with
    /// 7-day sparklines and 24h change.
    pub async fn get_markets(
        &self,
        ids: Option<&[TokenId]>,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let mut url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h",
            self.base_url, VS_CURRENCY, MARKETS_PAGE_SIZE
        );
        if let Some(ids) = ids {
            let joined = ids
                .iter()
                .map(|id| urlencoding::encode(id.as_str()).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            url = format!("{}&ids={}", url, joined);
        }
        self.get(&url).await
    }

    // ── Search ───────────────────────────────────────────────────────────

    pub async fn search(&self, query: &str) -> Result<SearchResponse, HttpError> {
        let url = format!(
            "{}/search?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get(&url).await
    }

    pub async fn get_trending(&self) -> Result<TrendingResponse, HttpError> {
        let url = format!("{}/search/trending", self.base_url);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let mut req = self.client.get(url);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        tracing::debug!("GET {}", url);
        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let bytes = resp.bytes().await?;
            return serde_json::from_slice::<T>(&bytes)
                .map_err(|e| HttpError::Decode(e.to_string()));
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for MarketHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
        }
    }
}
