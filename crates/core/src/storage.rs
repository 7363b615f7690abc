//! Key-value persistence boundary for basket state.
//!
//! Baskets are stored as JSON strings under two fixed keys, one for the cart
//! and one for favorites. The store itself is injected so the basket logic can
//! run against a browser session, a test map, or anything else that can get
//! and set strings.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::BasketError;

/// Fixed storage keys.
pub mod keys {
    /// Key holding the serialized cart entries.
    pub const CART: &str = "uglyThingsCart";

    /// Key holding the serialized favorite entries.
    pub const FAVORITES: &str = "uglyThingsFavorites";
}

/// A string-keyed store of string values.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }
}

/// In-memory store backed by a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Load a collection from `key`.
///
/// Missing or undecodable values yield the default (empty) collection.
pub fn load<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`BasketError::Encode`] if the value cannot be serialized.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), BasketError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| BasketError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, encoded);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").is_none());

        store.set("k", "v1".to_string());
        store.set("k", "v2".to_string());
        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_missing_defaults() {
        let store = MemoryStore::new();
        let loaded: Vec<u32> = load(&store, keys::CART);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_malformed_defaults() {
        let mut store = MemoryStore::new();
        store.set(keys::CART, "{not json".to_string());
        let loaded: Vec<u32> = load(&store, keys::CART);
        assert!(loaded.is_empty());

        store.set(keys::CART, "{\"id\":1}".to_string());
        let loaded: Vec<u32> = load(&store, keys::CART);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save(&mut store, keys::FAVORITES, &[3_u32, 1, 2]).unwrap();
        assert_eq!(store.get(keys::FAVORITES).as_deref(), Some("[3,1,2]"));

        let loaded: Vec<u32> = load(&store, keys::FAVORITES);
        assert_eq!(loaded, vec![3, 1, 2]);
    }
}
