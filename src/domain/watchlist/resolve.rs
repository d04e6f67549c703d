//! Prioritized token lookup: catalog → search cache → trending cache.

use crate::domain::token::{Token, TokenStub};
use crate::shared::TokenId;
use std::collections::HashMap;

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Catalog,
    Search,
    Trending,
}

/// Read-only index over the three token sources.
///
/// First match wins, both across sources (in priority order) and within a
/// source that happens to list the same id twice.
pub struct TokenResolver<'a> {
    catalog: HashMap<&'a str, &'a Token>,
    search: HashMap<&'a str, &'a TokenStub>,
    trending: HashMap<&'a str, &'a TokenStub>,
}

impl<'a> TokenResolver<'a> {
    pub fn new(catalog: &'a [Token], search: &'a [TokenStub], trending: &'a [TokenStub]) -> Self {
        let mut catalog_index = HashMap::with_capacity(catalog.len());
        for token in catalog {
            catalog_index.entry(token.id.as_str()).or_insert(token);
        }
        Self {
            catalog: catalog_index,
            search: index_stubs(search),
            trending: index_stubs(trending),
        }
    }

    /// Resolve an id to a watchlist-ready token.
    ///
    /// Stub matches come back with zeroed price fields. A match missing its
    /// id, name or symbol is treated as unresolved.
    pub fn resolve(&self, id: &TokenId) -> Option<(Token, TokenSource)> {
        let key = id.as_str();
        let resolved = if let Some(token) = self.catalog.get(key) {
            ((*token).clone(), TokenSource::Catalog)
        } else if let Some(stub) = self.search.get(key) {
            (Token::from(*stub), TokenSource::Search)
        } else if let Some(stub) = self.trending.get(key) {
            (Token::from(*stub), TokenSource::Trending)
        } else {
            return None;
        };

        resolved.0.is_complete().then_some(resolved)
    }
}

fn index_stubs(stubs: &[TokenStub]) -> HashMap<&str, &TokenStub> {
    let mut index = HashMap::with_capacity(stubs.len());
    for stub in stubs {
        index.entry(stub.id.as_str()).or_insert(stub);
    }
    index
}
