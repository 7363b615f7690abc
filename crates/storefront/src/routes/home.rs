//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;
use ugly_things_core::{Product, ProductId};

use crate::filters;
use crate::models::Flash;
use crate::routes::{NavCounts, take_flash};
use crate::state::AppState;
use crate::storage::{SessionBasket, load_basket};

/// A product card on the catalog page.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub favorited: bool,
    /// Show the "Added!" label on the cart button.
    pub just_added: bool,
    /// Highlight the favorite button.
    pub favorite_flash: bool,
}

impl ProductCardView {
    fn new(product: &Product, favorited: bool, flash: Option<&Flash>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            favorited,
            just_added: flash.is_some_and(|f| f.added_to_cart(product.id)),
            favorite_flash: flash.is_some_and(|f| f.favorite_toggled(product.id)),
        }
    }

    /// Heart symbol for the favorite button.
    #[must_use]
    pub const fn favorite_symbol(&self) -> &'static str {
        if self.favorited { "♥" } else { "♡" }
    }
}

/// Build the catalog cards from the basket snapshot.
#[must_use]
pub fn product_cards(basket: &SessionBasket<'_>, flash: Option<&Flash>) -> Vec<ProductCardView> {
    basket
        .listing()
        .map(|(product, favorited)| ProductCardView::new(product, favorited, flash))
        .collect()
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavCounts,
    pub notice: Option<String>,
    pub products: Vec<ProductCardView>,
}

/// Display the catalog.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let basket = load_basket(state.catalog(), &session).await;

    HomeTemplate {
        nav: NavCounts::from(&basket),
        notice: flash.as_ref().and_then(Flash::notice).map(str::to_owned),
        products: product_cards(&basket, flash.as_ref()),
    }
}
