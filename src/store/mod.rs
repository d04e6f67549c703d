//! Persistence adapter — the `{watchlist, connectedWallet}` blob.
//!
//! `KeyValueStore` is the external blob store; `PortfolioStore` defines what
//! is read and written. Load and save failures are logged and absorbed:
//! a missing or corrupt blob behaves exactly like a first run.

#[cfg(all(feature = "file-store", not(target_arch = "wasm32")))]
pub mod file;
pub mod memory;
#[cfg(all(feature = "web-storage", target_arch = "wasm32"))]
pub mod web;

#[cfg(all(feature = "file-store", not(target_arch = "wasm32")))]
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(all(feature = "web-storage", target_arch = "wasm32"))]
pub use web::WebStorage;

use crate::domain::watchlist::WatchlistEntry;
use crate::error::{PortfolioError, StoreError};
use crate::network::STORAGE_KEY;
use crate::shared::WalletAddress;
use serde::{Deserialize, Deserializer, Serialize};

/// Durable string-blob storage scoped to this application.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// The persisted subset of portfolio state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedPortfolio {
    #[serde(default, deserialize_with = "null_as_default")]
    pub watchlist: Vec<WatchlistEntry>,
    #[serde(rename = "connectedWallet", default)]
    pub connected_wallet: Option<WalletAddress>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads and writes `PersistedPortfolio` under one fixed key.
#[derive(Debug, Clone)]
pub struct PortfolioStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PortfolioStore<S> {
    /// Store under the default `tokenPortfolio` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Last saved snapshot, or the empty default on any failure.
    pub fn load(&self) -> PersistedPortfolio {
        match self.try_load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => PersistedPortfolio::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, "Discarding persisted portfolio: {}", e);
                PersistedPortfolio::default()
            }
        }
    }

    /// Write a snapshot. Failures are logged, never returned.
    pub fn save(&self, persisted: &PersistedPortfolio) {
        if let Err(e) = self.try_save(persisted) {
            tracing::warn!(key = %self.key, "Failed to persist portfolio: {}", e);
        }
    }

    pub fn try_load(&self) -> Result<Option<PersistedPortfolio>, PortfolioError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn try_save(&self, persisted: &PersistedPortfolio) -> Result<(), PortfolioError> {
        let raw = serde_json::to_string(persisted)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }

    /// Drop the stored blob entirely.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, "Failed to clear persisted portfolio: {}", e);
        }
    }
}
