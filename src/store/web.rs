//! Browser `localStorage` key-value store.

use super::KeyValueStore;
use crate::error::StoreError;
use std::fmt::Debug;

fn unavailable(e: impl Debug) -> StoreError {
    StoreError::Unavailable(format!("{:?}", e))
}

/// Wraps the window's `localStorage`.
pub struct WebStorage {
    storage: web_sys::Storage,
}

impl WebStorage {
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}
