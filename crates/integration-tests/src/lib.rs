//! Integration tests for the Ugly Things Store.
//!
//! The storefront router runs in-process; requests go through
//! `tower::ServiceExt::oneshot` and the session cookie is carried between
//! them, like a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ugly-things-integration-tests
//! ```

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::MemoryStore;
use ugly_things_core::Catalog;
use ugly_things_storefront::{
    app, config::StorefrontConfig, middleware::session::SESSION_COOKIE_NAME, state::AppState,
};

/// A response with its body read into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// One visitor talking to a fresh storefront.
pub struct TestContext {
    router: Router,
    cookie: Option<String>,
}

impl TestContext {
    /// Build a storefront with default configuration and an empty session store.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration fails to load.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|_| None).expect("default config is valid");
        let state = AppState::new(config, Catalog::standard());
        Self {
            router: app(state, MemoryStore::default()),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.request("GET", uri).body(Body::empty());
        self.send(request).await
    }

    /// Send a POST request with url-encoded form fields.
    ///
    /// Values are sent as given, so they must already be url-encoded.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body));
        self.send(request).await
    }

    /// Add one unit of a product to the cart.
    pub async fn add_to_cart(&mut self, product_id: i32) -> TestResponse {
        let id = product_id.to_string();
        self.post_form("/cart/add", &[("product_id", &id), ("return_to", "/")])
            .await
    }

    /// Toggle a product's favorite status.
    pub async fn toggle_favorite(&mut self, product_id: i32) -> TestResponse {
        let id = product_id.to_string();
        self.post_form("/favorites/toggle", &[("product_id", &id), ("return_to", "/")])
            .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Result<Request<Body>, axum::http::Error>) -> TestResponse {
        let request = request.expect("request is well formed");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.remember_cookie(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body is readable")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        let session_cookie = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.starts_with(&format!("{SESSION_COOKIE_NAME}=")));

        if let Some(pair) = session_cookie {
            self.cookie = Some(pair.to_string());
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
