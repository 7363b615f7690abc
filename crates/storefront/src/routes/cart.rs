//! Cart route handlers.
//!
//! The cart lives in the visitor's session under the core cart key. Each
//! action loads it, applies one basket operation, saves it, and redirects back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use ugly_things_core::{CartEntry, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::Flash;
use crate::routes::{NavCounts, ProductForm, set_flash, take_flash};
use crate::state::AppState;
use crate::storage::{SessionBasket, load_basket, save_basket};

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            price: entry.price.display(),
            quantity: entry.quantity.get(),
            line_price: entry.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Total with two decimals, without a currency symbol.
    pub total: String,
    pub item_count: u32,
}

impl From<&SessionBasket<'_>> for CartView {
    fn from(basket: &SessionBasket<'_>) -> Self {
        Self {
            items: basket.cart().entries().iter().map(CartItemView::from).collect(),
            total: basket.calculate_total().format_total(),
            item_count: basket.item_count(),
        }
    }
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub product_id: ProductId,
    pub delta: i32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavCounts,
    pub notice: Option<String>,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let basket = load_basket(state.catalog(), &session).await;

    CartShowTemplate {
        nav: NavCounts::from(&basket),
        notice: flash.as_ref().and_then(Flash::notice).map(str::to_owned),
        cart: CartView::from(&basket),
    }
}

/// Add one unit of a product to the cart.
///
/// Unknown products are ignored.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;

    if basket.add_to_cart(form.product_id)? {
        let product_id = form.product_id.to_string();
        tracing::debug!(%product_id, count = basket.item_count(), "Added to cart");
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
        set_flash(&session, Flash::AddedToCart { id: form.product_id }).await?;
    }

    save_basket(basket, &session).await?;
    Ok(Redirect::to(&form.redirect_target("/")))
}

/// Change a cart entry's quantity by a delta.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateQuantityForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;
    basket.update_quantity(form.product_id, form.delta)?;
    tracing::debug!(product_id = %form.product_id, delta = form.delta, "Updated cart quantity");
    save_basket(basket, &session).await?;
    Ok(Redirect::to("/cart"))
}

/// Remove an entry from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;
    basket.remove_from_cart(form.product_id)?;
    tracing::debug!(product_id = %form.product_id, "Removed from cart");
    save_basket(basket, &session).await?;
    Ok(Redirect::to(&form.redirect_target("/cart")))
}

/// Get cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let basket = load_basket(state.catalog(), &session).await;
    CartCountTemplate {
        count: basket.item_count(),
    }
}
