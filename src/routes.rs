//! Top-level router configuration combining the embedded app and public routes.
//!
//! # Route Structure
//!
//! - `GET  /app`                - Onboarding page (session token required)
//! - `POST /app`                - Onboarding action (session token required)
//! - `GET  /auth/session-token` - App Bridge bounce page (public)
//! - `GET  /health`             - Health check: setup store (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Session guard** - Platform session token verification
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, Tier};
use crate::api::middleware::{session_guard, tracing};
use crate::state::AppState;
use crate::web;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let embedded = web::routes::embedded_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session_guard::layer,
    ));
    let embedded = rate_limit::apply(embedded, Tier::Secure, behind_proxy);

    let public = rate_limit::apply(web::routes::public_routes(), Tier::Public, behind_proxy);

    let router = Router::new()
        .merge(embedded)
        .merge(public)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
