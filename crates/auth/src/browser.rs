//! The browser environment seam: location, storage and navigation

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::AuthError;

/// A key-value storage area (sessionStorage or localStorage)
pub trait KeyValueStorage: Send + Sync {
    fn keys(&self) -> Result<Vec<String>, AuthError>;

    fn get_item(&self, key: &str) -> Result<Option<String>, AuthError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthError>;

    fn remove_item(&self, key: &str) -> Result<(), AuthError>;
}

/// What the coordinator needs from the hosting page
pub trait BrowserEnvironment: Send + Sync {
    /// The full URL of the current page
    fn current_url(&self) -> String;

    /// The origin of the current page
    fn origin(&self) -> String;

    /// Short-lived storage
    fn session_storage(&self) -> &dyn KeyValueStorage;

    /// Long-lived storage
    fn local_storage(&self) -> &dyn KeyValueStorage;

    /// Full-page navigation
    fn navigate(&self, url: &str);
}

/// In-memory storage for headless hosts
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, AuthError> {
        self.items
            .lock()
            .map_err(|_| AuthError::storage("storage lock poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn keys(&self) -> Result<Vec<String>, AuthError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AuthError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Remove every key that starts with one of `prefixes`.
/// Returns how many keys were removed.
pub fn remove_prefixed(storage: &dyn KeyValueStorage, prefixes: &[&str]) -> Result<usize, AuthError> {
    let mut removed = 0;
    for key in storage.keys()? {
        if prefixes.iter().any(|prefix| key.starts_with(prefix)) {
            storage.remove_item(&key)?;
            removed += 1;
        }
    }
    Ok(removed)
}
