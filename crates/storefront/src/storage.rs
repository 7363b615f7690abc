//! Session-backed basket storage.
//!
//! [`SessionStorage`] reads the basket keys out of the visitor's session once
//! per request, serves the synchronous [`KeyValueStore`] calls the basket
//! makes, and writes changed keys back when flushed.

use std::collections::{BTreeSet, HashMap};

use tower_sessions::Session;
use ugly_things_core::storage::keys;
use ugly_things_core::{Basket, Catalog, KeyValueStore};

/// Storage keys mirrored from the session.
const BASKET_KEYS: [&str; 2] = [keys::CART, keys::FAVORITES];

/// Snapshot of the session's basket keys with write tracking.
#[derive(Debug, Default)]
pub struct SessionStorage {
    values: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionStorage {
    /// Read the basket keys from `session`.
    ///
    /// Values that are missing or not strings are treated as absent.
    pub async fn load(session: &Session) -> Self {
        let mut values = HashMap::new();
        for key in BASKET_KEYS {
            if let Some(value) = session.get::<String>(key).await.ok().flatten() {
                values.insert(key.to_owned(), value);
            }
        }
        Self {
            values,
            dirty: BTreeSet::new(),
        }
    }

    /// Whether any key has been written since loading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Write changed keys back to `session`.
    ///
    /// Each changed key is overwritten whole, so when two requests from the
    /// same session race, the last flush wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn flush(self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        for key in &self.dirty {
            if let Some(value) = self.values.get(key) {
                session.insert(key, value).await?;
            }
        }
        Ok(())
    }
}

impl KeyValueStore for SessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
        self.dirty.insert(key.to_owned());
    }
}

/// A basket backed by the visitor's session.
pub type SessionBasket<'c> = Basket<'c, SessionStorage>;

/// Load the visitor's basket.
pub async fn load_basket<'c>(catalog: &'c Catalog, session: &Session) -> SessionBasket<'c> {
    Basket::load(catalog, SessionStorage::load(session).await)
}

/// Persist whatever the basket changed.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_basket(
    basket: SessionBasket<'_>,
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    let storage = basket.into_store();
    if storage.is_dirty() {
        storage.flush(session).await?;
    }
    Ok(())
}
