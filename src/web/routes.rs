//! Embedded admin route configuration.

use crate::api::handlers::app_action_handler;
use crate::state::AppState;
use crate::web::handlers::{app_index_handler, session_token_handler};
use axum::{Router, routing::get};

/// Embedded pages requiring a verified session token.
///
/// Protected via [`crate::api::middleware::session_guard::layer`].
///
/// # Endpoints
///
/// - `GET /app` - Onboarding page
/// - `POST /app` - Onboarding action (`intent=create_connect_link`)
pub fn embedded_routes() -> Router<AppState> {
    Router::new().route("/app", get(app_index_handler).post(app_action_handler))
}

/// Public pages without a session.
///
/// # Endpoints
///
/// - `GET /auth/session-token` - App Bridge bounce page
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/auth/session-token", get(session_token_handler))
}
