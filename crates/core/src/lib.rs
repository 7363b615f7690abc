//! Ugly Things Core - catalog and basket state.
//!
//! This crate holds everything about the store that does not depend on how it
//! is displayed:
//! - the fixed product [`catalog`]
//! - the visitor's [`basket`] (cart and favorites)
//! - the [`storage`] boundary the basket is mirrored to
//! - [`checkout`] validation and receipts
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! sessions. The storefront plugs its session store in through
//! [`KeyValueStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod storage;
pub mod types;

pub use basket::{Basket, Cart, CartEntry, FavoriteEntry, FavoriteToggle, Favorites};
pub use catalog::{Catalog, Product};
pub use checkout::{CheckoutDetails, CheckoutError, OrderReceipt};
pub use error::BasketError;
pub use storage::{KeyValueStore, MemoryStore};
pub use types::*;
