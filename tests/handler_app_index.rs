mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use shop_onboarding::domain::entities::{NewSetupCompletion, ShopDomain};
use shop_onboarding::domain::repositories::SetupRepository;

fn server() -> TestServer {
    let state = common::create_test_state("http://127.0.0.1:1/stripe", common::memory_store());
    TestServer::new(common::test_app(state)).unwrap()
}

#[tokio::test]
async fn test_app_page_renders_onboarding_button() {
    let server = server();
    let token = common::session_token(common::SHOP);

    let response = server
        .get(&format!("/app?shop={}&host=YWRtaW4&id_token={token}", common::SHOP))
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"<meta name="shopify-api-key" content="test-api-key""#));
    assert!(html.contains("https://cdn.shopify.com/shopifycloud/app-bridge.js"));
    assert!(html.contains("Connect a Stripe account"));
    assert!(html.contains("Generate Stripe Onboarding Link"));
    assert!(html.contains(&format!(r#"action="/app?shop={}&amp;host=YWRtaW4"#, common::SHOP)));
    assert!(!html.contains("App is Ready!"));
}

#[tokio::test]
async fn test_app_page_with_bearer_token() {
    let server = server();

    let response = server
        .get("/app")
        .authorization_bearer(common::session_token(common::SHOP))
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Generate Stripe Onboarding Link"));
}

#[tokio::test]
async fn test_app_page_when_setup_complete() {
    let store = common::memory_store();
    store
        .mark_complete(NewSetupCompletion::new(
            ShopDomain::from_trusted(common::SHOP),
            "acct_1Nv0FGQ9RKHgCVdK",
        ))
        .await
        .unwrap();

    let state = common::create_test_state("http://127.0.0.1:1/stripe", store);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .get("/app")
        .authorization_bearer(common::session_token(common::SHOP))
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("App is Ready!"));
    assert!(html.contains("Your Stripe Account (acct_1Nv0FGQ9RKHgCVdK) is connected."));
    assert!(!html.contains("Generate Stripe Onboarding Link"));
}

#[tokio::test]
async fn test_setup_of_other_shop_is_not_shown() {
    let store = common::memory_store();
    store
        .mark_complete(NewSetupCompletion::new(
            ShopDomain::from_trusted("other.myshopify.com"),
            "acct_other",
        ))
        .await
        .unwrap();

    let state = common::create_test_state("http://127.0.0.1:1/stripe", store);
    let server = TestServer::new(common::test_app(state)).unwrap();

    let response = server
        .get("/app")
        .authorization_bearer(common::session_token(common::SHOP))
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Generate Stripe Onboarding Link"));
}

#[tokio::test]
async fn test_document_load_without_token_bounces() {
    let server = server();

    let response = server
        .get(&format!("/app?shop={}&host=YWRtaW4", common::SHOP))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("/auth/session-token?"));
    assert!(location.contains("shop=acme.myshopify.com"));
    assert!(location.contains("host=YWRtaW4"));
    assert!(location.contains("shopify-reload=%2Fapp%3Fshop%3Dacme.myshopify.com"));
}

#[tokio::test]
async fn test_request_without_shop_is_unauthorized() {
    let server = server();

    let response = server.get("/app").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.header("x-shopify-retry-invalid-session-request"),
        "1"
    );
    assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_invalid_shop_is_not_bounced() {
    let server = server();

    let response = server.get("/app?shop=evil.example.com").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let server = server();
    let mut token = common::session_token(common::SHOP);
    token.push('x');

    let response = server.get("/app").authorization_bearer(token).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_token_bounce_page_is_public() {
    let server = server();

    let response = server
        .get("/auth/session-token?shop=acme.myshopify.com&shopify-reload=%2Fapp")
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"<meta name="shopify-api-key" content="test-api-key""#));
    assert!(html.contains("https://cdn.shopify.com/shopifycloud/app-bridge.js"));
}
