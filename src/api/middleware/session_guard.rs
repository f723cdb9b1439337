//! Session guard middleware for the embedded app.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Authenticates embedded-app requests via the configured
/// [`crate::domain::session_guard::SessionGuard`].
///
/// # Flow
///
/// 1. Hand the request head to the guard
/// 2. On success, insert the [`crate::domain::entities::Session`] into the
///    request extensions and continue to the handler
/// 3. On rejection, return the guard's response (401 with the App Bridge
///    retry header, or a redirect to the bounce page)
///
/// # Example
///
/// ```rust,ignore
/// use axum::middleware;
///
/// let embedded = web::routes::embedded_routes()
///     .layer(middleware::from_fn_with_state(state.clone(), session_guard::layer));
/// ```
///
/// Handlers behind this layer extract the session with
/// `Extension<Session>`.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    match st.session_guard.authenticate(&mut parts).await {
        Ok(session) => {
            tracing::debug!(shop = %session.shop, "Session verified");
            parts.extensions.insert(session);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(rejection) => rejection.into_response(),
    }
}
