//! Favorite entries: saved product snapshots, independent of the cart.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A snapshot of a product taken when it was favorited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub description: String,
}

impl From<&Product> for FavoriteEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            description: product.description.clone(),
        }
    }
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

/// Ordered favorites, at most one entry per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FavoriteEntry>", into = "Vec<FavoriteEntry>")]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    #[must_use]
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove `product` if present, otherwise append a snapshot of it.
    #[must_use]
    pub fn toggled(&self, product: &Product) -> (Self, FavoriteToggle) {
        if self.contains(product.id) {
            (self.without(product.id), FavoriteToggle::Removed)
        } else {
            let mut entries = self.entries.clone();
            entries.push(FavoriteEntry::from(product));
            (Self { entries }, FavoriteToggle::Added)
        }
    }

    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.id != id).cloned().collect(),
        }
    }
}

impl From<Vec<FavoriteEntry>> for Favorites {
    fn from(raw: Vec<FavoriteEntry>) -> Self {
        let mut entries: Vec<FavoriteEntry> = Vec::with_capacity(raw.len());
        for entry in raw {
            if !entries.iter().any(|e| e.id == entry.id) {
                entries.push(entry);
            }
        }
        Self { entries }
    }
}

impl From<Favorites> for Vec<FavoriteEntry> {
    fn from(favorites: Favorites) -> Self {
        favorites.entries
    }
}
