//! Checkout route handlers.
//!
//! Checkout collects a name, email and address, empties the cart, and shows a
//! receipt. No order leaves the server.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use ugly_things_core::{CheckoutDetails, CheckoutError, OrderReceipt};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::Flash;
use crate::routes::cart::{CartItemView, CartView};
use crate::routes::{NavCounts, set_flash};
use crate::state::AppState;
use crate::storage::{load_basket, save_basket};

/// Checkout form data.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub nav: NavCounts,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

/// Order success template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct OrderSuccessTemplate {
    pub nav: NavCounts,
    pub name: String,
    pub email: String,
    pub lines: Vec<CartItemView>,
    pub item_count: u32,
    pub total: String,
}

impl OrderSuccessTemplate {
    fn new(nav: NavCounts, receipt: &OrderReceipt) -> Self {
        Self {
            nav,
            name: receipt.customer.name.clone(),
            email: receipt.customer.email.to_string(),
            lines: receipt.lines.iter().map(CartItemView::from).collect(),
            item_count: receipt.item_count,
            total: receipt.total.format_total(),
        }
    }
}

/// Send the visitor back to the cart with the empty-cart notice.
async fn empty_cart_redirect(session: &Session) -> Result<Response> {
    set_flash(
        session,
        Flash::Notice {
            message: CheckoutError::EmptyCart.to_string(),
        },
    )
    .await?;
    Ok(Redirect::to("/cart").into_response())
}

/// Display the checkout form.
///
/// An empty cart redirects to the cart page instead.
#[instrument(skip(state, session))]
pub async fn form(State(state): State<AppState>, session: Session) -> Result<Response> {
    let basket = load_basket(state.catalog(), &session).await;
    if basket.cart().is_empty() {
        return empty_cart_redirect(&session).await;
    }

    Ok(CheckoutFormTemplate {
        nav: NavCounts::from(&basket),
        cart: CartView::from(&basket),
        form: CheckoutForm::default(),
        error: None,
    }
    .into_response())
}

/// Place the order.
///
/// Invalid details re-render the form with `422 Unprocessable Entity`.
#[instrument(skip(state, session, form))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let mut basket = load_basket(state.catalog(), &session).await;
    if basket.cart().is_empty() {
        return empty_cart_redirect(&session).await;
    }

    let placed = CheckoutDetails::parse(&form.name, &form.email, &form.address)
        .and_then(|details| basket.place_order(details));

    let receipt = match placed {
        Ok(receipt) => receipt,
        Err(CheckoutError::EmptyCart) => return empty_cart_redirect(&session).await,
        Err(CheckoutError::Basket(e)) => return Err(AppError::Basket(e)),
        Err(e) => {
            tracing::debug!(error = %e, "Checkout form rejected");
            let page = CheckoutFormTemplate {
                nav: NavCounts::from(&basket),
                cart: CartView::from(&basket),
                form,
                error: Some(e.to_string()),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    tracing::info!(
        items = receipt.item_count,
        total = %receipt.total.format_total(),
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", None);

    let nav = NavCounts::from(&basket);
    save_basket(basket, &session).await?;
    Ok(OrderSuccessTemplate::new(nav, &receipt).into_response())
}
