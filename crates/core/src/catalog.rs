//! The fixed product catalog.
//!
//! Products are defined once at startup and never change. Everything else in
//! the store (cart entries, favorites) refers back to them by [`ProductId`].

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    /// Absolute URL of the product image.
    pub image: String,
}

impl Product {
    fn listing(id: i32, title: &str, description: &str, dollars: u32) -> Self {
        Self {
            id: ProductId::new(id),
            title: title.to_owned(),
            description: description.to_owned(),
            price: Price::from_dollars(dollars),
            image: placeholder_image(title),
        }
    }
}

/// Placeholder image URL with the title as the caption.
fn placeholder_image(title: &str) -> String {
    format!(
        "https://via.placeholder.com/300x300?text={}",
        title.replace(' ', "+")
    )
}

/// An ordered, immutable set of products with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// Later duplicates of an id are dropped so lookups stay unambiguous.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        Self { products: unique }
    }

    /// The store's standard line-up.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Product::listing(
                1,
                "Ugly Vase",
                "A beautifully broken vase with character",
                100,
            ),
            Product::listing(
                2,
                "Crooked Painting",
                "A painting that didn't quite turn out as planned",
                75,
            ),
            Product::listing(
                3,
                "Mismatched Mugs",
                "A set of mugs that definitely don't match",
                45,
            ),
            Product::listing(
                4,
                "Wobbly Table",
                "Adds a unique rocking motion to your dining experience",
                120,
            ),
            Product::listing(5, "Faded Rug", "Once vibrant, now beautifully muted", 85),
            Product::listing(
                6,
                "Chipped Teapot",
                "Adds rustic charm to your tea parties",
                60,
            ),
        ])
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
