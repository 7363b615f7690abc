//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Catalog
//!
//! # Cart
//! GET  /cart                      - Cart page
//! POST /cart/add                  - Add one unit (flashes "Added!")
//! POST /cart/update               - Change quantity by a delta
//! POST /cart/remove               - Remove an entry
//! GET  /cart/count                - Cart count badge (fragment)
//!
//! # Favorites
//! GET  /favorites                 - Favorites page
//! POST /favorites/toggle          - Favorite or unfavorite
//! POST /favorites/remove          - Unfavorite
//! POST /favorites/move-to-cart    - Add a favorite to the cart
//!
//! # Checkout
//! GET  /checkout                  - Checkout form
//! POST /checkout                  - Place order
//!
//! # Navigation
//! GET  /pages/{page}              - store, new, catalog
//! ```
//!
//! Every mutating route answers with a `303 See Other` back to the page the
//! form came from, so a refresh never repeats the action.

pub mod cart;
pub mod checkout;
pub mod favorites;
pub mod home;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use ugly_things_core::ProductId;

use crate::models::{Flash, session_keys};
use crate::state::AppState;
use crate::storage::SessionBasket;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::show))
        .route("/toggle", post(favorites::toggle))
        .route("/remove", post(favorites::remove))
        .route("/move-to-cart", post(favorites::move_to_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/favorites", favorite_routes())
        .route("/checkout", get(checkout::form).post(checkout::place_order))
        .route("/pages/{page}", get(pages::show))
}

// =============================================================================
// Shared form and view types
// =============================================================================

/// Form posted by every per-product button.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
    /// Page to go back to after the action.
    pub return_to: Option<String>,
}

impl ProductForm {
    /// Where to redirect once the action is done.
    #[must_use]
    pub fn redirect_target(&self, fallback: &str) -> String {
        local_path(self.return_to.as_deref()).unwrap_or(fallback).to_string()
    }
}

/// Accept only same-site absolute paths.
fn local_path(candidate: Option<&str>) -> Option<&str> {
    candidate.filter(|path| {
        path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
    })
}

/// Header badge counts, shown on every page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavCounts {
    pub cart: u32,
    pub favorites: usize,
}

impl From<&SessionBasket<'_>> for NavCounts {
    fn from(basket: &SessionBasket<'_>) -> Self {
        Self {
            cart: basket.item_count(),
            favorites: basket.favorites().len(),
        }
    }
}

// =============================================================================
// Flash helpers
// =============================================================================

/// Queue feedback for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn set_flash(
    session: &Session,
    flash: Flash,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, flash).await
}

/// Take the pending feedback, if any. Unreadable values are dropped.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    session
        .remove::<Flash>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
