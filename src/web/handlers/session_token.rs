//! Session token bounce page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

/// Template for the bounce page.
///
/// Loads App Bridge, which fetches a fresh session token and reloads the
/// URL named by the `shopify-reload` query parameter.
#[derive(Template, WebTemplate)]
#[template(path = "session_token.html")]
pub struct SessionTokenTemplate {
    pub api_key: String,
}

/// Renders the bounce page.
///
/// # Endpoint
///
/// `GET /auth/session-token` (public)
pub async fn session_token_handler(State(state): State<AppState>) -> impl IntoResponse {
    SessionTokenTemplate {
        api_key: state.shopify.api_key.clone(),
    }
}
