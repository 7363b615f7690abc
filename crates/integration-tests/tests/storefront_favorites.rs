//! Integration tests for the favorites pages and actions.

use axum::http::StatusCode;
use ugly_things_integration_tests::TestContext;

#[tokio::test]
async fn test_empty_favorites_page() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/favorites").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("added any items to favorites yet."));
}

#[tokio::test]
async fn test_toggle_adds_then_removes() {
    let mut ctx = TestContext::new();

    let resp = ctx.toggle_favorite(2).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));

    let page = ctx.get("/favorites").await;
    assert!(page.body.contains("Crooked Painting"));

    ctx.toggle_favorite(2).await;
    let page = ctx.get("/favorites").await;
    assert!(!page.body.contains("Crooked Painting"));
}

#[tokio::test]
async fn test_catalog_marks_favorites() {
    let mut ctx = TestContext::new();
    assert!(!ctx.get("/").await.body.contains('♥'));

    ctx.toggle_favorite(3).await;
    let page = ctx.get("/").await;
    assert_eq!(page.body.matches('♥').count(), 1);
    assert_eq!(page.body.matches('♡').count(), 5);
}

#[tokio::test]
async fn test_move_to_cart_keeps_favorite() {
    let mut ctx = TestContext::new();
    ctx.toggle_favorite(4).await;

    let resp = ctx
        .post_form(
            "/favorites/move-to-cart",
            &[("product_id", "4"), ("return_to", "/favorites")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/favorites"));

    let favorites = ctx.get("/favorites").await;
    assert!(favorites.body.contains("Wobbly Table"));
    assert!(favorites.body.contains("Added!"));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Wobbly Table"));
    assert!(cart.body.contains("120.00"));
}

#[tokio::test]
async fn test_remove_favorite() {
    let mut ctx = TestContext::new();
    ctx.toggle_favorite(5).await;
    ctx.toggle_favorite(6).await;

    ctx.post_form("/favorites/remove", &[("product_id", "5")])
        .await;

    let page = ctx.get("/favorites").await;
    assert!(!page.body.contains("Faded Rug"));
    assert!(page.body.contains("Chipped Teapot"));
}

#[tokio::test]
async fn test_favorites_and_cart_are_independent() {
    let mut ctx = TestContext::new();
    ctx.toggle_favorite(1).await;
    ctx.add_to_cart(1).await;
    ctx.toggle_favorite(1).await;

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Ugly Vase"));

    let favorites = ctx.get("/favorites").await;
    assert!(!favorites.body.contains("Ugly Vase"));
}
