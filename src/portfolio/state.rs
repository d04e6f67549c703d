//! Portfolio state container and its update logic.
//!
//! Everything here is synchronous and side-effect free. Network results
//! arrive as a [`Completion`] and are folded in by [`PortfolioState::apply`].

use crate::domain::allocation::{self, AllocationSlice};
use crate::domain::token::{Token, TokenStub};
use crate::domain::wallet::WalletStatus;
use crate::domain::watchlist::{AddReport, TokenResolver, Watchlist};
use crate::network::{SEARCH_LIMIT, TRENDING_LIMIT};
use crate::shared::{clamp_holdings, TokenId, WalletAddress};
use crate::store::PersistedPortfolio;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

// ─── Network commands ────────────────────────────────────────────────────────

/// The four network-backed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Catalog,
    Search,
    Trending,
    Prices,
}

impl FetchKind {
    /// The opaque message stored as the last error when this command fails.
    pub fn error_message(&self) -> &'static str {
        match self {
            FetchKind::Catalog => "Failed to fetch market data",
            FetchKind::Search => "Failed to search tokens",
            FetchKind::Trending => "Failed to fetch trending tokens",
            FetchKind::Prices => "Failed to refresh prices",
        }
    }
}

/// A provider failure with its cause already logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkFailure {
    pub cause: String,
}

impl NetworkFailure {
    pub fn new(cause: impl std::fmt::Display) -> Self {
        Self {
            cause: cause.to_string(),
        }
    }
}

/// Result of a provider call, ready to be applied.
#[derive(Debug, Clone)]
pub enum Completion {
    Catalog(Result<Vec<Token>, NetworkFailure>),
    Search(Result<Vec<TokenStub>, NetworkFailure>),
    Trending(Result<Vec<TokenStub>, NetworkFailure>),
    Prices(Result<Vec<Token>, NetworkFailure>),
}

impl Completion {
    pub fn kind(&self) -> FetchKind {
        match self {
            Completion::Catalog(_) => FetchKind::Catalog,
            Completion::Search(_) => FetchKind::Search,
            Completion::Trending(_) => FetchKind::Trending,
            Completion::Prices(_) => FetchKind::Prices,
        }
    }
}

// ─── PortfolioState ──────────────────────────────────────────────────────────

/// Everything the view reads. Callers only ever hold clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioState {
    /// Market catalog from the last successful bulk listing.
    pub tokens: Vec<Token>,
    pub watchlist: Watchlist,
    pub search_results: Vec<TokenStub>,
    pub trending_tokens: Vec<TokenStub>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Time of the last successful catalog load or price refresh.
    pub last_updated: Option<DateTime<Utc>>,
    pub connected_wallet: Option<WalletAddress>,
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state restored from the persisted subset.
    pub fn from_persisted(persisted: PersistedPortfolio) -> Self {
        Self {
            watchlist: Watchlist::from_entries(persisted.watchlist),
            connected_wallet: persisted.connected_wallet,
            ..Self::default()
        }
    }

    /// The subset written to the store.
    pub fn persisted(&self) -> PersistedPortfolio {
        PersistedPortfolio {
            watchlist: self.watchlist.entries().to_vec(),
            connected_wallet: self.connected_wallet.clone(),
        }
    }

    /// Mark a network command as in flight.
    pub fn begin(&mut self, _kind: FetchKind) {
        self.is_loading = true;
        self.error = None;
    }

    /// Fold a provider result into state.
    ///
    /// Returns `true` when the persisted subset changed.
    pub fn apply(&mut self, completion: Completion, now: DateTime<Utc>) -> bool {
        let kind = completion.kind();
        self.is_loading = false;

        let outcome = match completion {
            Completion::Catalog(result) => result.map(|tokens| {
                self.tokens = tokens;
                self.last_updated = Some(now);
                false
            }),
            Completion::Search(result) => result.map(|mut hits| {
                hits.truncate(SEARCH_LIMIT);
                self.search_results = hits;
                false
            }),
            Completion::Trending(result) => result.map(|mut items| {
                items.truncate(TRENDING_LIMIT);
                self.trending_tokens = items;
                false
            }),
            Completion::Prices(result) => result.map(|fresh| {
                self.watchlist.apply_prices(&fresh);
                self.last_updated = Some(now);
                true
            }),
        };

        match outcome {
            Ok(persist) => persist,
            Err(_) => {
                self.error = Some(kind.error_message().to_string());
                false
            }
        }
    }

    // ─── Synchronous commands ────────────────────────────────────────────

    /// Resolve and append ids, then prune them from the search and trending caches.
    pub fn add_to_watchlist(&mut self, ids: &[TokenId]) -> AddReport {
        let report = {
            let resolver =
                TokenResolver::new(&self.tokens, &self.search_results, &self.trending_tokens);
            self.watchlist.add(ids, &resolver)
        };

        if !report.added.is_empty() {
            let added: HashSet<&TokenId> = report.added.iter().collect();
            self.search_results.retain(|s| !added.contains(&s.id));
            self.trending_tokens.retain(|t| !added.contains(&t.id));
        }
        report
    }

    pub fn remove_from_watchlist(&mut self, id: &TokenId) -> bool {
        self.watchlist.remove(id)
    }

    /// Negative holdings are clamped to zero.
    pub fn update_holdings(&mut self, id: &TokenId, holdings: Decimal) -> bool {
        self.watchlist.update_holdings(id, clamp_holdings(holdings))
    }

    pub fn clear_search(&mut self) {
        self.search_results.clear();
    }

    pub fn set_connected_wallet(&mut self, address: WalletAddress) {
        self.connected_wallet = Some(address);
    }

    pub fn clear_connected_wallet(&mut self) {
        self.connected_wallet = None;
    }

    /// Mirror an external wallet status report.
    ///
    /// Returns `true` when the stored address changed.
    pub fn sync_wallet(&mut self, status: &WalletStatus) -> bool {
        let next = if status.is_connected {
            match status.connected_address() {
                Some(address) => Some(address),
                None => return false,
            }
        } else {
            None
        };

        if self.connected_wallet == next {
            return false;
        }
        self.connected_wallet = next;
        true
    }

    // ─── Derivations ─────────────────────────────────────────────────────

    /// Σ holdings × price across the watchlist, recomputed on every call.
    pub fn total_value(&self) -> Decimal {
        allocation::total_value(self.watchlist.iter())
    }

    pub fn allocation(&self) -> Vec<AllocationSlice> {
        allocation::breakdown(self.watchlist.entries())
    }
}
