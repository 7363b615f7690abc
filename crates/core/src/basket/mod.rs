//! Basket state: the visitor's cart and favorites.
//!
//! [`Basket`] owns both collections together with the store they are mirrored
//! to. Each operation computes a new snapshot with the pure functions on
//! [`Cart`] and [`Favorites`], swaps it in, and writes it back to the store.
//! Operations on product ids that are not in the catalog, or not in the
//! collection being changed, do nothing.
//!
//! ```
//! use ugly_things_core::{Basket, Catalog, MemoryStore, Price, ProductId};
//!
//! let catalog = Catalog::standard();
//! let mut basket = Basket::load(&catalog, MemoryStore::new());
//!
//! basket.add_to_cart(ProductId::new(1))?;
//! basket.add_to_cart(ProductId::new(1))?;
//! basket.add_to_cart(ProductId::new(2))?;
//!
//! assert_eq!(basket.calculate_total(), Price::from_dollars(275));
//! # Ok::<(), ugly_things_core::BasketError>(())
//! ```

mod cart;
mod favorites;

pub use cart::{Cart, CartEntry};
pub use favorites::{FavoriteEntry, FavoriteToggle, Favorites};

use crate::catalog::{Catalog, Product};
use crate::checkout::{CheckoutDetails, CheckoutError, OrderReceipt};
use crate::error::BasketError;
use crate::storage::{self, KeyValueStore, keys};
use crate::types::{Price, ProductId};

/// A visitor's cart and favorites, persisted to `S`.
#[derive(Debug)]
pub struct Basket<'c, S> {
    catalog: &'c Catalog,
    store: S,
    cart: Cart,
    favorites: Favorites,
}

impl<'c, S: KeyValueStore> Basket<'c, S> {
    /// Restore both collections from `store`.
    ///
    /// Missing or malformed stored values start out empty.
    pub fn load(catalog: &'c Catalog, store: S) -> Self {
        let cart = storage::load(&store, keys::CART);
        let favorites = storage::load(&store, keys::FAVORITES);
        Self {
            catalog,
            store,
            cart,
            favorites,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product to the cart.
    ///
    /// Returns `false` without touching anything if the product is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded for storage.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<bool, BasketError> {
        let catalog = self.catalog;
        let Some(product) = catalog.find(id) else {
            return Ok(false);
        };
        let cart = self.cart.with_added(product);
        self.replace_cart(cart)?;
        Ok(true)
    }

    /// Remove a product's entry from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded for storage.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), BasketError> {
        let cart = self.cart.without(id);
        self.replace_cart(cart)
    }

    /// Change a cart entry's quantity by `delta`, removing it at zero or below.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded for storage.
    pub fn update_quantity(&mut self, id: ProductId, delta: i32) -> Result<(), BasketError> {
        match self.cart.with_quantity_changed(id, delta) {
            Some(cart) => self.replace_cart(cart),
            None => Ok(()),
        }
    }

    /// Sum of price times quantity over the cart.
    #[must_use]
    pub fn calculate_total(&self) -> Price {
        self.cart.total()
    }

    /// Units in the cart, for the header badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded for storage.
    pub fn clear_cart(&mut self) -> Result<(), BasketError> {
        self.replace_cart(Cart::default())
    }

    fn replace_cart(&mut self, cart: Cart) -> Result<(), BasketError> {
        storage::save(&mut self.store, keys::CART, &cart)?;
        self.cart = cart;
        Ok(())
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Favorite a product, or unfavorite it if it already is one.
    ///
    /// Returns `None` if the product is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be encoded for storage.
    pub fn toggle_favorite(&mut self, id: ProductId) -> Result<Option<FavoriteToggle>, BasketError> {
        let catalog = self.catalog;
        let Some(product) = catalog.find(id) else {
            return Ok(None);
        };
        let (favorites, action) = self.favorites.toggled(product);
        self.replace_favorites(favorites)?;
        Ok(Some(action))
    }

    /// Unfavorite a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the favorites cannot be encoded for storage.
    pub fn remove_from_favorites(&mut self, id: ProductId) -> Result<(), BasketError> {
        let favorites = self.favorites.without(id);
        self.replace_favorites(favorites)
    }

    #[must_use]
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.favorites.contains(id)
    }

    /// Add a favorite to the cart. The product stays favorited.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be encoded for storage.
    pub fn move_favorite_to_cart(&mut self, id: ProductId) -> Result<bool, BasketError> {
        self.add_to_cart(id)
    }

    fn replace_favorites(&mut self, favorites: Favorites) -> Result<(), BasketError> {
        storage::save(&mut self.store, keys::FAVORITES, &favorites)?;
        self.favorites = favorites;
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Place an order for everything in the cart and empty it.
    ///
    /// Favorites are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order, or a
    /// storage error if the emptied cart cannot be saved.
    pub fn place_order(&mut self, customer: CheckoutDetails) -> Result<OrderReceipt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let receipt = OrderReceipt {
            customer,
            lines: self.cart.entries().to_vec(),
            item_count: self.cart.item_count(),
            total: self.cart.total(),
        };
        self.clear_cart()?;
        Ok(receipt)
    }

    /// Products paired with whether each one is favorited, in catalog order.
    pub fn listing(&self) -> impl Iterator<Item = (&'c Product, bool)> + '_ {
        self.catalog
            .products()
            .iter()
            .map(move |product| (product, self.favorites.contains(product.id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn quantities<S: KeyValueStore>(basket: &Basket<'_, S>) -> Vec<(i32, u32)> {
        basket
            .cart()
            .entries()
            .iter()
            .map(|e| (e.id.as_i32(), e.quantity.get()))
            .collect()
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails::parse("Ada", "ada@example.com", "1 Crooked Lane").unwrap()
    }

    #[test]
    fn test_add_each_product_once() {
        let catalog = Catalog::standard();
        for product in catalog.products() {
            let mut basket = Basket::load(&catalog, MemoryStore::new());
            assert!(basket.add_to_cart(product.id).unwrap());
            assert_eq!(quantities(&basket), vec![(product.id.as_i32(), 1)]);
        }
    }

    #[test]
    fn test_example_scenario() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());

        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(2)).unwrap();

        assert_eq!(quantities(&basket), vec![(1, 2), (2, 1)]);
        assert_eq!(basket.calculate_total(), Price::from_dollars(275));
        assert_eq!(basket.calculate_total().format_total(), "275.00");
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(4)).unwrap();
        basket.toggle_favorite(id(5)).unwrap();

        let reloaded = Basket::load(&catalog, basket.into_store());
        assert_eq!(quantities(&reloaded), vec![(4, 1)]);
        assert!(reloaded.is_favorite(id(5)));
    }

    #[test]
    fn test_persist_then_load_round_trip() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(3)).unwrap();
        let saved = basket.cart().clone();

        let reloaded = Basket::load(&catalog, basket.into_store());
        assert_eq!(reloaded.cart(), &saved);
        assert_eq!(quantities(&reloaded), vec![(1, 2), (3, 1)]);
    }

    #[test]
    fn test_stored_format() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(2)).unwrap();

        let raw = basket.store().get(keys::CART).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 2);
        assert_eq!(value[0]["title"], "Crooked Painting");
        assert_eq!(value[0]["quantity"], 1);
        assert_eq!(value[0]["price"].as_f64(), Some(75.0));
    }

    #[test]
    fn test_loads_hand_written_storage() {
        let catalog = Catalog::standard();
        let mut store = MemoryStore::new();
        store.set(
            keys::CART,
            r#"[{"id":1,"title":"Ugly Vase","price":100,"quantity":2},
                {"id":3,"title":"Mismatched Mugs","price":45,"quantity":1}]"#
                .to_string(),
        );

        let basket = Basket::load(&catalog, store);
        assert_eq!(quantities(&basket), vec![(1, 2), (3, 1)]);
        assert_eq!(basket.calculate_total(), Price::from_dollars(245));
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let catalog = Catalog::standard();
        let mut store = MemoryStore::new();
        store.set(keys::CART, "not json".to_string());
        store.set(keys::FAVORITES, "[{\"id\":\"x\"}]".to_string());

        let basket = Basket::load(&catalog, store);
        assert!(basket.cart().is_empty());
        assert!(basket.favorites().is_empty());
    }

    #[test]
    fn test_oversized_stored_cart_does_not_panic() {
        let catalog = Catalog::standard();
        let mut store = MemoryStore::new();
        store.set(
            keys::CART,
            r#"[{"id":1,"title":"Ugly Vase","price":1e28,"quantity":10}]"#.to_string(),
        );

        let mut basket = Basket::load(&catalog, store);
        assert_eq!(basket.cart().len(), 1);
        assert_eq!(basket.calculate_total(), Price::MAX);

        for _ in 0..3 {
            basket.update_quantity(id(1), i32::MAX).unwrap();
        }
        assert_eq!(quantities(&basket), vec![(1, u32::MAX)]);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());

        assert!(!basket.add_to_cart(id(99)).unwrap());
        basket.update_quantity(id(99), 1).unwrap();
        assert_eq!(basket.toggle_favorite(id(99)).unwrap(), None);
        assert!(!basket.move_favorite_to_cart(id(99)).unwrap());

        assert!(basket.cart().is_empty());
        assert!(basket.favorites().is_empty());
        assert!(basket.store().is_empty());
    }

    #[test]
    fn test_update_quantity_by_negative_quantity_removes() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(6)).unwrap();
        basket.add_to_cart(id(6)).unwrap();
        basket.add_to_cart(id(3)).unwrap();

        basket.update_quantity(id(6), -2).unwrap();
        assert_eq!(quantities(&basket), vec![(3, 1)]);

        basket.update_quantity(id(3), 4).unwrap();
        assert_eq!(quantities(&basket), vec![(3, 5)]);
    }

    #[test]
    fn test_remove_from_cart() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(2)).unwrap();

        basket.remove_from_cart(id(1)).unwrap();
        assert_eq!(quantities(&basket), vec![(2, 1)]);

        basket.remove_from_cart(id(1)).unwrap();
        assert_eq!(quantities(&basket), vec![(2, 1)]);
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.toggle_favorite(id(2)).unwrap();
        let before = basket.favorites().clone();

        assert_eq!(
            basket.toggle_favorite(id(4)).unwrap(),
            Some(FavoriteToggle::Added)
        );
        assert_eq!(
            basket.toggle_favorite(id(4)).unwrap(),
            Some(FavoriteToggle::Removed)
        );
        assert_eq!(basket.favorites(), &before);
    }

    #[test]
    fn test_favorites_and_cart_are_independent() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());

        basket.toggle_favorite(id(1)).unwrap();
        assert!(basket.cart().is_empty());

        assert!(basket.move_favorite_to_cart(id(1)).unwrap());
        assert_eq!(quantities(&basket), vec![(1, 1)]);
        assert!(basket.is_favorite(id(1)));

        basket.remove_from_cart(id(1)).unwrap();
        assert!(basket.is_favorite(id(1)));

        basket.remove_from_favorites(id(1)).unwrap();
        assert!(basket.favorites().is_empty());
    }

    #[test]
    fn test_place_order_clears_cart_only() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.add_to_cart(id(1)).unwrap();
        basket.add_to_cart(id(2)).unwrap();
        basket.toggle_favorite(id(3)).unwrap();

        let receipt = basket.place_order(details()).unwrap();
        assert_eq!(receipt.item_count, 2);
        assert_eq!(receipt.total, Price::from_dollars(175));
        assert_eq!(receipt.lines.len(), 2);

        assert!(basket.cart().is_empty());
        assert!(basket.is_favorite(id(3)));

        let reloaded = Basket::load(&catalog, basket.into_store());
        assert!(reloaded.cart().is_empty());
    }

    #[test]
    fn test_place_order_with_empty_cart() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        assert!(matches!(
            basket.place_order(details()),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(basket.store().is_empty());
    }

    #[test]
    fn test_listing_marks_favorites() {
        let catalog = Catalog::standard();
        let mut basket = Basket::load(&catalog, MemoryStore::new());
        basket.toggle_favorite(id(2)).unwrap();

        let marked: Vec<i32> = basket
            .listing()
            .filter(|(_, favorite)| *favorite)
            .map(|(product, _)| product.id.as_i32())
            .collect();
        assert_eq!(marked, vec![2]);
        assert_eq!(basket.listing().count(), 6);
    }
}
