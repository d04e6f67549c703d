//! Watchlist container — insertion-ordered, unique by id.

use super::{TokenResolver, TokenSource, WatchlistEntry};
use crate::domain::token::Token;
use crate::shared::TokenId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Outcome of one `add` batch. Never surfaced to the user; logged only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddReport {
    /// Ids appended, in input order.
    pub added: Vec<TokenId>,
    /// Ids already present (or repeated within the batch).
    pub skipped_existing: Vec<TokenId>,
    /// Ids not found in any source.
    pub unresolved: Vec<TokenId>,
    /// Added ids that came from the search or trending cache and so carry
    /// no price until the next refresh.
    pub from_stubs: Vec<(TokenId, TokenSource)>,
}

impl AddReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }
}

/// User-curated, ordered list of tracked tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from previously stored entries, dropping repeated ids.
    pub fn from_entries(entries: Vec<WatchlistEntry>) -> Self {
        let mut watchlist = Self { entries };
        watchlist.dedup();
        watchlist
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<WatchlistEntry> {
        self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchlistEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<TokenId> {
        self.entries.iter().map(|e| e.id().clone()).collect()
    }

    pub fn get(&self, id: &TokenId) -> Option<&WatchlistEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &TokenId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every resolvable id not already tracked, in input order.
    ///
    /// Existing entries are never touched, so repeated adds are no-ops.
    pub fn add(&mut self, ids: &[TokenId], resolver: &TokenResolver<'_>) -> AddReport {
        let mut present: HashSet<TokenId> = self.entries.iter().map(|e| e.id().clone()).collect();
        let mut report = AddReport::default();

        for id in ids {
            if present.contains(id) {
                report.skipped_existing.push(id.clone());
                continue;
            }
            match resolver.resolve(id) {
                Some((token, source)) => {
                    if source != TokenSource::Catalog {
                        report.from_stubs.push((token.id.clone(), source));
                    }
                    present.insert(token.id.clone());
                    report.added.push(token.id.clone());
                    self.entries.push(WatchlistEntry::new(token));
                }
                None => report.unresolved.push(id.clone()),
            }
        }

        self.dedup();
        report
    }

    /// Remove by id. Returns whether an entry was removed.
    pub fn remove(&mut self, id: &TokenId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        self.entries.len() != before
    }

    /// Set holdings on one entry. Returns whether the id was found.
    pub fn update_holdings(&mut self, id: &TokenId, holdings: Decimal) -> bool {
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(entry) => {
                entry.set_holdings(holdings);
                true
            }
            None => false,
        }
    }

    /// Apply fresh market rows by id. Ids missing from `fresh` keep stale prices.
    ///
    /// Returns the number of entries updated.
    pub fn apply_prices(&mut self, fresh: &[Token]) -> usize {
        let mut by_id: HashMap<&TokenId, &Token> = HashMap::with_capacity(fresh.len());
        for token in fresh {
            by_id.entry(&token.id).or_insert(token);
        }

        let mut updated = 0;
        for entry in &mut self.entries {
            if let Some(token) = by_id.get(entry.id()) {
                entry.apply_price(token);
                updated += 1;
            }
        }
        updated
    }

    /// Keep the first occurrence of each id.
    fn dedup(&mut self) {
        let mut seen = HashSet::with_capacity(self.entries.len());
        self.entries.retain(|e| seen.insert(e.id().clone()));
    }
}
