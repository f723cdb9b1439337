//! Embedded admin page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{RawQuery, State},
    response::IntoResponse,
};

use crate::domain::entities::{Session, SetupStatus};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::view_state::ViewState;

/// Template for the onboarding page.
///
/// Renders `templates/app_index.html`: either the connected confirmation or
/// the "Generate Stripe Onboarding Link" button with the panel for the
/// current [`ViewState`]. The page script drives the same states client-side.
#[derive(Template, WebTemplate)]
#[template(path = "app_index.html")]
pub struct AppIndexTemplate {
    pub api_key: String,
    pub form_action: String,
    pub connected_account: Option<String>,
    pub pending: bool,
    pub link_url: Option<String>,
    pub error: Option<String>,
}

impl AppIndexTemplate {
    /// Builds the page for a shop's setup status and panel state.
    ///
    /// `query` is the page's own query string, carried into the form action
    /// so a script-less submission keeps its session token.
    pub fn new(
        api_key: &str,
        query: Option<&str>,
        setup: Option<SetupStatus>,
        view: &ViewState,
    ) -> Self {
        let form_action = match query {
            Some(q) if !q.is_empty() => format!("/app?{q}"),
            _ => "/app".to_string(),
        };

        Self {
            api_key: api_key.to_string(),
            form_action,
            connected_account: setup.map(|s| s.stripe_account_id),
            pending: view.is_pending(),
            link_url: view.link_url().map(str::to_string),
            error: view.error().map(str::to_string),
        }
    }
}

/// Renders the onboarding page in its initial (idle) state.
///
/// # Endpoint
///
/// `GET /app` (session guard required)
///
/// # Errors
///
/// Returns 500 if the setup store cannot be read.
pub async fn app_index_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let setup = state.setup_service.status(&session.shop).await?;

    Ok(AppIndexTemplate::new(
        &state.shopify.api_key,
        query.as_deref(),
        setup,
        &ViewState::Idle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShopDomain;
    use chrono::Utc;

    fn render(setup: Option<SetupStatus>, view: &ViewState) -> String {
        AppIndexTemplate::new("test-key", Some("shop=acme.myshopify.com"), setup, view)
            .render()
            .unwrap()
    }

    #[test]
    fn test_idle_page() {
        let html = render(None, &ViewState::Idle);

        assert!(html.contains(r#"<meta name="shopify-api-key" content="test-key""#));
        assert!(html.contains("Connect a Stripe account"));
        assert!(html.contains("Generate Stripe Onboarding Link"));
        assert!(html.contains(r#"name="intent" value="create_connect_link""#));
        assert!(!html.contains("<a href="));
        assert!(!html.contains(r#"id="connect-button" disabled"#));
        assert!(!html.contains("App is Ready!"));
    }

    #[test]
    fn test_ready_page_links_to_url() {
        let html = render(
            None,
            &ViewState::Ready("https://connect.example/abc123".to_string()),
        );

        assert!(html.contains("Click below to open Stripe onboarding:"));
        assert!(html.contains(r#"href="https://connect.example/abc123""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(r#"rel="noopener noreferrer">Go to Stripe Connect</a>"#));
    }

    #[test]
    fn test_failed_page_shows_error() {
        let html = render(
            None,
            &ViewState::Failed("Backend responded with an error.".to_string()),
        );

        assert!(html.contains(r#"role="alert">Backend responded with an error.</p>"#));
        assert!(!html.contains("<a href="));
    }

    #[test]
    fn test_pending_page_disables_button() {
        let html = render(None, &ViewState::Pending);

        assert!(html.contains("<p>Generating link...</p>"));
        assert!(html.contains(r#"id="connect-button" disabled"#));
    }

    #[test]
    fn test_connected_page() {
        let setup = SetupStatus {
            shop: ShopDomain::from_trusted("acme.myshopify.com"),
            stripe_account_id: "acct_123".to_string(),
            completed_at: Utc::now(),
        };

        let html = render(Some(setup), &ViewState::Idle);

        assert!(html.contains("App is Ready!"));
        assert!(html.contains("Your Stripe Account (acct_123) is connected."));
        assert!(!html.contains("Generate Stripe Onboarding Link"));
    }

    #[test]
    fn test_form_action_keeps_query() {
        let page = AppIndexTemplate::new("k", Some("shop=a&id_token=t"), None, &ViewState::Idle);
        assert_eq!(page.form_action, "/app?shop=a&id_token=t");

        let page = AppIndexTemplate::new("k", None, None, &ViewState::Idle);
        assert_eq!(page.form_action, "/app");
    }

    #[test]
    fn test_link_is_escaped() {
        let html = render(
            None,
            &ViewState::Ready(r#"https://connect.example/"><script>"#.to_string()),
        );

        assert!(!html.contains(r#""><script>"#));
    }
}
