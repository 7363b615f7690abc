//! Favorites route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;
use ugly_things_core::{FavoriteEntry, FavoriteToggle, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::Flash;
use crate::routes::{NavCounts, ProductForm, set_flash, take_flash};
use crate::state::AppState;
use crate::storage::{load_basket, save_basket};

/// Favorite display data for templates.
#[derive(Clone)]
pub struct FavoriteView {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub description: String,
    pub image: String,
    /// Show the "Added!" label on the add-to-cart button.
    pub just_added: bool,
}

impl FavoriteView {
    fn new(entry: &FavoriteEntry, flash: Option<&Flash>) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            price: entry.price.display(),
            description: entry.description.clone(),
            image: entry.image.clone(),
            just_added: flash.is_some_and(|f| f.added_to_cart(entry.id)),
        }
    }
}

/// Favorites page template.
#[derive(Template, WebTemplate)]
#[template(path = "favorites/show.html")]
pub struct FavoritesShowTemplate {
    pub nav: NavCounts,
    pub notice: Option<String>,
    pub favorites: Vec<FavoriteView>,
}

/// Display favorites page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flash = take_flash(&session).await;
    let basket = load_basket(state.catalog(), &session).await;

    FavoritesShowTemplate {
        nav: NavCounts::from(&basket),
        notice: flash.as_ref().and_then(Flash::notice).map(str::to_owned),
        favorites: basket
            .favorites()
            .entries()
            .iter()
            .map(|entry| FavoriteView::new(entry, flash.as_ref()))
            .collect(),
    }
}

/// Favorite a product, or unfavorite it if it already is one.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;

    if let Some(action) = basket.toggle_favorite(form.product_id)? {
        let added = action == FavoriteToggle::Added;
        let product_id = form.product_id.to_string();
        tracing::debug!(%product_id, added, "Toggled favorite");
        add_breadcrumb(
            "favorites",
            if added { "Favorited" } else { "Unfavorited" },
            Some(&[("product_id", product_id.as_str())]),
        );
        set_flash(
            &session,
            Flash::FavoriteToggled {
                id: form.product_id,
                added,
            },
        )
        .await?;
    }

    save_basket(basket, &session).await?;
    Ok(Redirect::to(&form.redirect_target("/")))
}

/// Unfavorite a product.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;
    basket.remove_from_favorites(form.product_id)?;
    tracing::debug!(product_id = %form.product_id, "Removed favorite");
    save_basket(basket, &session).await?;
    Ok(Redirect::to(&form.redirect_target("/favorites")))
}

/// Add a favorite to the cart. It stays in favorites.
#[instrument(skip(state, session))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let mut basket = load_basket(state.catalog(), &session).await;

    if basket.move_favorite_to_cart(form.product_id)? {
        tracing::debug!(product_id = %form.product_id, "Moved favorite to cart");
        set_flash(&session, Flash::AddedToCart { id: form.product_id }).await?;
    }

    save_basket(basket, &session).await?;
    Ok(Redirect::to(&form.redirect_target("/favorites")))
}
