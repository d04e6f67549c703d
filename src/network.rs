//! Network and storage constants.

/// Default market-data REST base URL (CoinGecko public v3 API).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency for every price and market-cap figure.
pub const VS_CURRENCY: &str = "usd";

/// Page size for the bulk market listing.
pub const MARKETS_PAGE_SIZE: u32 = 100;

/// Maximum number of search results kept in the search cache.
pub const SEARCH_LIMIT: usize = 10;

/// Maximum number of trending entries kept in the trending cache.
pub const TRENDING_LIMIT: usize = 6;

/// Fixed key under which the persisted portfolio blob is stored.
pub const STORAGE_KEY: &str = "tokenPortfolio";

/// Header carrying a CoinGecko demo API key, when one is configured.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";
