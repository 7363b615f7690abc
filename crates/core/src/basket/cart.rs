//! Cart entries and the pure operations over them.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A product in the cart with its desired quantity.
///
/// Title and price are copied from the product when the entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub quantity: NonZeroU32,
}

impl CartEntry {
    fn for_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity.get()
    }
}

/// Ordered cart contents, at most one entry per product.
///
/// Every mutation returns a new `Cart`; the receiver is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries
            .iter()
            .fold(0_u32, |sum, e| sum.saturating_add(e.quantity.get()))
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// One more unit of `product`, appending a new entry if needed.
    #[must_use]
    pub fn with_added(&self, product: &Product) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|e| e.id == product.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => entries.push(CartEntry::for_product(product)),
        }
        Self { entries }
    }

    /// The cart without the entry for `id`.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.id != id).cloned().collect(),
        }
    }

    /// Adjust the quantity for `id` by `delta`.
    ///
    /// Returns `None` when there is no entry for `id`. A resulting quantity of
    /// zero or less drops the entry; quantities saturate at `u32::MAX`.
    #[must_use]
    pub fn with_quantity_changed(&self, id: ProductId, delta: i32) -> Option<Self> {
        let current = self.get(id)?;
        let updated = i64::from(current.quantity.get()) + i64::from(delta);
        if updated <= 0 {
            return Some(self.without(id));
        }

        let quantity = u32::try_from(updated)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);

        let entries = self
            .entries
            .iter()
            .map(|e| {
                if e.id == id {
                    CartEntry {
                        quantity,
                        ..e.clone()
                    }
                } else {
                    e.clone()
                }
            })
            .collect();
        Some(Self { entries })
    }
}

impl From<Vec<CartEntry>> for Cart {
    /// Keeps the first entry for each product id.
    fn from(raw: Vec<CartEntry>) -> Self {
        let mut entries: Vec<CartEntry> = Vec::with_capacity(raw.len());
        for entry in raw {
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
        Self { entries }
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}
