//! Handler for the onboarding action.

use axum::{
    Extension, Form, Json,
    extract::{RawQuery, State, rejection::FormRejection},
    http::{HeaderMap, StatusCode, header::ACCEPT},
    response::{IntoResponse, Response},
};

use crate::api::dto::onboarding::{ActionForm, OnboardingLinkResponse};
use crate::domain::entities::Session;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::AppIndexTemplate;
use crate::web::view_state::ViewState;

/// Executes an onboarding intent for the session's shop.
///
/// # Endpoint
///
/// `POST /app` (session guard required)
///
/// # Request Body
///
/// `application/x-www-form-urlencoded`:
///
/// ```text
/// intent=create_connect_link
/// ```
///
/// A missing or unparsable body counts as a missing intent.
///
/// # Response
///
/// **200 OK**
/// ```json
/// { "url": "https://connect.stripe.com/setup/s/..." }
/// ```
///
/// **400 Bad Request** (`Invalid intent`) or **500 Internal Server Error**
/// (`Could not connect to backend.`, `Backend responded with an error.`,
/// `Invalid onboarding link response.`)
/// ```json
/// { "error": "Backend responded with an error." }
/// ```
///
/// # Content Negotiation
///
/// When the client prefers `text/html` (a script-less form post) the full
/// page is rendered instead, showing the link or the error with the same
/// status code.
pub async fn app_action_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    form: Result<Form<ActionForm>, FormRejection>,
) -> Result<Response, AppError> {
    let intent = match &form {
        Ok(Form(form)) => form.intent.as_deref(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable action form");
            None
        }
    };

    let outcome = state
        .onboarding_service
        .handle_intent(&session, intent)
        .await;

    if !prefers_html(&headers) {
        return Ok(match outcome {
            Ok(link) => Json(OnboardingLinkResponse { url: link.url }).into_response(),
            Err(e) => e.into_response(),
        });
    }

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };

    let setup = state.setup_service.status(&session.shop).await?;
    let page = AppIndexTemplate::new(
        &state.shopify.api_key,
        query.as_deref(),
        setup,
        &ViewState::from_outcome(&outcome),
    );

    Ok((status, page).into_response())
}

/// True when the first media range of `Accept` is `text/html`.
fn prefers_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .and_then(|accept| accept.split(',').next())
        .and_then(|range| range.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("text/html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_prefers_html() {
        assert!(prefers_html(&accept(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
        )));
        assert!(prefers_html(&accept("TEXT/HTML; charset=utf-8")));

        assert!(!prefers_html(&accept("application/json")));
        assert!(!prefers_html(&accept("*/*")));
        assert!(!prefers_html(&accept("application/json, text/html")));
        assert!(!prefers_html(&HeaderMap::new()));
    }
}
