//! High-level market-data client — `MarketClient` with nested sub-client accessors.
//!
//! The token sub-client lives in `domain/token/client.rs`. This module keeps
//! the builder and accessor methods.

use crate::domain::token::client::Tokens;
use crate::error::PortfolioError;
use crate::http::MarketHttp;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::token::client::Tokens as TokensClient;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "COINGECKO_API_URL";

/// Environment variable carrying an API key.
pub const API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// Entry point for market-data queries.
///
/// `client.tokens().markets()`, `client.tokens().search("sol")`, etc.
#[derive(Clone)]
pub struct MarketClient {
    pub(crate) http: MarketHttp,
}

impl MarketClient {
    pub fn builder() -> MarketClientBuilder {
        MarketClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketClientBuilder {
    base_url: String,
    api_key: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    timeout: Duration,
}

impl Default for MarketClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            api_key: None,
            #[cfg(not(target_arch = "wasm32"))]
            timeout: Duration::from_secs(30),
        }
    }
}

impl MarketClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Per-request timeout (native only; the browser owns fetch timeouts).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Apply `COINGECKO_API_URL` / `COINGECKO_API_KEY` when set and non-empty.
    pub fn from_env(mut self) -> Self {
        if let Some(url) = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Build the client.
    ///
    /// On native targets the `http` feature alone has no TLS backend, so
    /// requests to an `https://` base URL (the default) fail until the
    /// `native` feature enables rustls.
    pub fn build(self) -> Result<MarketClient, PortfolioError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = MarketHttp::with_timeout(&self.base_url, self.api_key, self.timeout)?;
        #[cfg(target_arch = "wasm32")]
        let http = MarketHttp::new(&self.base_url, self.api_key)?;

        Ok(MarketClient { http })
    }
}
