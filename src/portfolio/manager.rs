//! `PortfolioManager` — async command surface over `PortfolioState`.
//!
//! Network commands run in three steps: `begin` under the write lock,
//! the provider call with no lock held, then `apply` under the write lock.
//! Overlapping commands each apply their own slice when they finish;
//! the loading flag and last error are last-writer-wins.

use super::state::{Completion, FetchKind, NetworkFailure, PortfolioState};
use crate::domain::allocation::AllocationSlice;
use crate::domain::wallet::WalletStatus;
use crate::domain::watchlist::AddReport;
use crate::error::PortfolioError;
use crate::provider::MarketDataProvider;
use crate::shared::{TokenId, WalletAddress};
use crate::store::{KeyValueStore, PortfolioStore};
use async_lock::RwLock;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Owns the portfolio state and persists its durable subset.
///
/// Clones share the same state.
pub struct PortfolioManager<P, S> {
    provider: P,
    store: PortfolioStore<S>,
    state: Arc<RwLock<PortfolioState>>,
}

impl<P: Clone, S: Clone> Clone for PortfolioManager<P, S> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            store: self.store.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<P: MarketDataProvider, S: KeyValueStore> PortfolioManager<P, S> {
    /// Restore the watchlist and wallet from `store` and wrap `provider`.
    pub fn new(provider: P, store: PortfolioStore<S>) -> Self {
        let persisted = store.load();
        tracing::debug!(
            entries = persisted.watchlist.len(),
            wallet = persisted.connected_wallet.is_some(),
            "Restored portfolio"
        );
        Self {
            provider,
            store,
            state: Arc::new(RwLock::new(PortfolioState::from_persisted(persisted))),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &PortfolioStore<S> {
        &self.store
    }

    /// A clone of the current state.
    pub async fn snapshot(&self) -> PortfolioState {
        self.state.read().await.clone()
    }

    // ─── Network commands ────────────────────────────────────────────────

    /// Load the market catalog.
    pub async fn initialize_catalog(&self) {
        self.begin(FetchKind::Catalog).await;
        let result = self.provider.markets().await;
        self.finish(Completion::Catalog(self.settle(FetchKind::Catalog, result)))
            .await;
    }

    /// Search the provider. Blank queries are ignored; use `clear_search`.
    ///
    /// Non-blank queries are forwarded as typed.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring empty search query");
            return;
        }
        self.begin(FetchKind::Search).await;
        let result = self.provider.search(query).await;
        self.finish(Completion::Search(self.settle(FetchKind::Search, result)))
            .await;
    }

    pub async fn fetch_trending(&self) {
        self.begin(FetchKind::Trending).await;
        let result = self.provider.trending().await;
        self.finish(Completion::Trending(self.settle(FetchKind::Trending, result)))
            .await;
    }

    /// Re-price every watchlist entry. No-op on an empty watchlist.
    pub async fn refresh_prices(&self) {
        let ids = {
            let mut state = self.state.write().await;
            if state.watchlist.is_empty() {
                tracing::debug!("Watchlist empty, skipping price refresh");
                return;
            }
            tracing::debug!(kind = ?FetchKind::Prices, "Request started");
            state.begin(FetchKind::Prices);
            state.watchlist.ids()
        };
        let result = self.provider.markets_by_ids(&ids).await;
        self.finish(Completion::Prices(self.settle(FetchKind::Prices, result)))
            .await;
    }

    // ─── Local commands ──────────────────────────────────────────────────

    pub async fn clear_search(&self) {
        self.state.write().await.clear_search();
    }

    /// Add ids resolvable from the catalog or the search/trending caches.
    ///
    /// Unknown and already-tracked ids are skipped without error.
    pub async fn add_to_watchlist(&self, ids: &[TokenId]) {
        let mut state = self.state.write().await;
        let report: AddReport = state.add_to_watchlist(ids);
        tracing::debug!(
            added = report.added.len(),
            skipped = report.skipped_existing.len(),
            from_stubs = ?report.from_stubs,
            unresolved = ?report.unresolved,
            "Watchlist add"
        );
        self.store.save(&state.persisted());
    }

    pub async fn remove_from_watchlist(&self, id: &TokenId) {
        let mut state = self.state.write().await;
        if !state.remove_from_watchlist(id) {
            tracing::debug!(%id, "Remove ignored, not in watchlist");
        }
        self.store.save(&state.persisted());
    }

    /// Set holdings for one entry. Negative input is stored as zero.
    pub async fn update_holdings(&self, id: &TokenId, holdings: Decimal) {
        let mut state = self.state.write().await;
        if !state.update_holdings(id, holdings) {
            tracing::debug!(%id, "Holdings update ignored, not in watchlist");
        }
        self.store.save(&state.persisted());
    }

    pub async fn connect_wallet(&self, address: WalletAddress) {
        let mut state = self.state.write().await;
        tracing::debug!(address = %address.short(), "Wallet connected");
        state.set_connected_wallet(address);
        self.store.save(&state.persisted());
    }

    pub async fn disconnect_wallet(&self) {
        let mut state = self.state.write().await;
        state.clear_connected_wallet();
        self.store.save(&state.persisted());
    }

    /// Mirror a status report from the external wallet library.
    pub async fn sync_wallet(&self, status: &WalletStatus) {
        let mut state = self.state.write().await;
        if state.sync_wallet(status) {
            self.store.save(&state.persisted());
        }
    }

    // ─── Derived reads ───────────────────────────────────────────────────

    pub async fn total_value(&self) -> Decimal {
        self.state.read().await.total_value()
    }

    pub async fn allocation(&self) -> Vec<AllocationSlice> {
        self.state.read().await.allocation()
    }

    // ─── Internal ────────────────────────────────────────────────────────

    async fn begin(&self, kind: FetchKind) {
        tracing::debug!(?kind, "Request started");
        self.state.write().await.begin(kind);
    }

    async fn finish(&self, completion: Completion) {
        let mut state = self.state.write().await;
        if state.apply(completion, Utc::now()) {
            self.store.save(&state.persisted());
        }
    }

    fn settle<T>(
        &self,
        kind: FetchKind,
        result: Result<T, PortfolioError>,
    ) -> Result<T, NetworkFailure> {
        result.map_err(|e| {
            tracing::warn!(?kind, "{}: {}", kind.error_message(), e);
            NetworkFailure::new(e)
        })
    }
}
