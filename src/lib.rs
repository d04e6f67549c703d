//! # token-portfolio
//!
//! State core for a token watchlist and portfolio dashboard, for native and
//! WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Newtypes, domain models, allocation math, formatting (always available, WASM-safe)
//! 2. **Persistence** — `KeyValueStore` backends + `PortfolioStore` for the `tokenPortfolio` blob
//! 3. **HTTP API** — `MarketHttp`, one method per CoinGecko endpoint
//! 4. **Provider** — `MarketDataProvider` trait; `MarketClient` implements it
//! 5. **Portfolio** — `PortfolioState` reducer and the async `PortfolioManager`
//!
//! ## Quick Start
//!
//! Native builds that talk to the public HTTPS API need the `native`
//! feature (`token-portfolio = { features = ["native"] }`) for TLS.
//!
//! ```rust,ignore
//! use token_portfolio::prelude::*;
//!
//! let client = MarketClient::builder().from_env().build()?;
//! let store = PortfolioStore::new(FileStore::default_location()?);
//! let manager = PortfolioManager::new(client, store);
//!
//! manager.initialize_catalog().await;
//! manager.add_to_watchlist(&[TokenId::from("bitcoin")]).await;
//! manager.update_holdings(&TokenId::from("bitcoin"), parse_holdings("0.5")).await;
//! manager.refresh_prices().await;
//!
//! let total = manager.total_value().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL and storage constants.
pub mod network;

// ── Layer 2: Persistence ─────────────────────────────────────────────────────

/// Key-value stores and the persisted portfolio blob.
pub mod store;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Low-level CoinGecko HTTP client.
#[cfg(feature = "http")]
pub mod http;

/// `MarketClient`, the HTTP market-data entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Provider ────────────────────────────────────────────────────────

/// Market data provider trait.
pub mod provider;

// ── Layer 5: Portfolio ───────────────────────────────────────────────────────

/// Portfolio state and command orchestration.
pub mod portfolio;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{clamp_holdings, parse_holdings, TokenId, WalletAddress};

    // Domain types
    pub use crate::domain::allocation::{AllocationSlice, PALETTE};
    pub use crate::domain::token::{Sparkline, Token, TokenStub};
    pub use crate::domain::wallet::{format_balance, WalletStatus};
    pub use crate::domain::watchlist::{AddReport, Watchlist, WatchlistEntry};

    // Errors
    pub use crate::error::{HttpError, PortfolioError, StoreError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, STORAGE_KEY};

    // Persistence
    #[cfg(all(feature = "file-store", not(target_arch = "wasm32")))]
    pub use crate::store::FileStore;
    #[cfg(all(feature = "web-storage", target_arch = "wasm32"))]
    pub use crate::store::WebStorage;
    pub use crate::store::{KeyValueStore, MemoryStore, PersistedPortfolio, PortfolioStore};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{MarketClient, MarketClientBuilder, TokensClient};

    // Provider + state
    pub use crate::portfolio::{PortfolioManager, PortfolioState};
    pub use crate::provider::MarketDataProvider;
}
