//! Navigation page route handlers.
//!
//! The header links switch between the catalog and two short text pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::NavCounts;
use crate::state::AppState;
use crate::storage::load_basket;

/// A navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Store,
    New,
    Catalog,
    NotFound,
}

impl Page {
    /// Resolve a page slug. Unknown slugs resolve to [`Page::NotFound`].
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "store" => Self::Store,
            "new" => Self::New,
            "catalog" => Self::Catalog,
            _ => Self::NotFound,
        }
    }

    /// Heading shown on the page.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Store => "About Our Store",
            Self::New => "New Arrivals",
            Self::Catalog => "Catalog",
            Self::NotFound => "Page not found!",
        }
    }

    /// Body paragraphs.
    #[must_use]
    pub const fn paragraphs(self) -> &'static [&'static str] {
        match self {
            Self::Store => &[
                "Welcome to the Ugly Things Store! We believe that beauty is in the eye of \
                 the beholder, and sometimes the most interesting items are those that are a \
                 little bit imperfect.",
                "Our mission is to find homes for these unique pieces that others might \
                 overlook. After all, ugly doesn't mean unwanted!",
            ],
            Self::New => &["Check back soon for new ugly additions to our collection!"],
            Self::Catalog | Self::NotFound => &[],
        }
    }

    const fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::OK,
        }
    }
}

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub nav: NavCounts,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

/// Display a navigation page by slug.
///
/// `catalog` goes back to the catalog; unknown slugs render a 404 page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Response {
    let page = Page::from_slug(&slug);
    if page == Page::Catalog {
        return Redirect::to("/").into_response();
    }
    if page == Page::NotFound {
        tracing::debug!(%slug, "Unknown page");
    }

    let basket = load_basket(state.catalog(), &session).await;
    let template = ContentPageTemplate {
        nav: NavCounts::from(&basket),
        title: page.title(),
        paragraphs: page.paragraphs(),
    };
    (page.status(), template).into_response()
}
