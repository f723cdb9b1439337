#![allow(dead_code)]

use axum::{Router, middleware, routing::get};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use shop_onboarding::api::handlers::health_handler;
use shop_onboarding::api::middleware::session_guard;
use shop_onboarding::application::services::{OnboardingService, SetupService};
use shop_onboarding::config::{API_VERSION, AUTH_PATH_PREFIX, BackendConfig, ShopifyAppConfig};
use shop_onboarding::domain::repositories::SetupRepository;
use shop_onboarding::infrastructure::backend::HttpOnboardingClient;
use shop_onboarding::infrastructure::persistence::MemorySetupRepository;
use shop_onboarding::infrastructure::shopify::SessionTokenGuard;
use shop_onboarding::state::AppState;
use shop_onboarding::web;

pub const API_KEY: &str = "test-api-key";
pub const API_SECRET: &str = "test-api-secret";
pub const SHOP: &str = "acme.myshopify.com";

pub fn shopify_config() -> ShopifyAppConfig {
    ShopifyAppConfig {
        api_key: API_KEY.to_string(),
        api_secret: API_SECRET.to_string(),
        scopes: vec![],
        app_url: "https://app.example.com".to_string(),
        api_version: API_VERSION,
        auth_path_prefix: AUTH_PATH_PREFIX,
        custom_shop_domains: vec![],
    }
}

/// State wired to a real HTTP client pointed at `backend_base_url`.
pub fn create_test_state(
    backend_base_url: &str,
    setup_repository: Arc<dyn SetupRepository>,
) -> AppState {
    create_test_state_with_timeout(backend_base_url, setup_repository, 5)
}

pub fn create_test_state_with_timeout(
    backend_base_url: &str,
    setup_repository: Arc<dyn SetupRepository>,
    timeout_secs: u64,
) -> AppState {
    let shopify = shopify_config();

    let backend = BackendConfig {
        base_url: backend_base_url.to_string(),
        timeout_secs,
        connect_timeout_secs: 1,
    };
    let client = HttpOnboardingClient::from_config(&backend).unwrap();
    let guard = SessionTokenGuard::from_config(&shopify).unwrap();

    AppState::new(
        Arc::new(shopify),
        Arc::new(guard),
        Arc::new(OnboardingService::new(Arc::new(client))),
        Arc::new(SetupService::new(setup_repository)),
    )
}

pub fn memory_store() -> Arc<MemorySetupRepository> {
    Arc::new(MemorySetupRepository::new())
}

/// Full route set without rate limiting, which needs a peer address.
pub fn test_app(state: AppState) -> Router {
    let embedded = web::routes::embedded_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session_guard::layer,
    ));

    Router::new()
        .merge(embedded)
        .merge(web::routes::public_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Signs a session token for `shop` valid for one minute.
pub fn session_token(shop: &str) -> String {
    let now = Utc::now().timestamp();
    sign(&json!({
        "iss": format!("https://{shop}/admin"),
        "dest": format!("https://{shop}"),
        "aud": API_KEY,
        "sub": "42",
        "exp": now + 60,
        "nbf": now - 5,
        "iat": now - 5,
        "jti": "b5f5a1a4",
        "sid": "session-1",
    }))
}

pub fn expired_session_token(shop: &str) -> String {
    let now = Utc::now().timestamp();
    sign(&json!({
        "iss": format!("https://{shop}/admin"),
        "dest": format!("https://{shop}"),
        "aud": API_KEY,
        "exp": now - 600,
        "nbf": now - 660,
    }))
}

pub fn sign(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());

    let mut mac = Hmac::<Sha256>::new_from_slice(API_SECRET.as_bytes()).unwrap();
    mac.update(format!("{header}.{payload}").as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{header}.{payload}.{signature}")
}
