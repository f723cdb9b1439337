//! Session guard capability.

use async_trait::async_trait;
use axum::http::request::Parts;

use crate::domain::entities::Session;
use crate::error::AuthRejection;

/// Authenticates an inbound embedded-admin request.
///
/// Polymorphic over the platform's authentication protocol: callers only
/// ever see the resulting [`Session`] or an [`AuthRejection`] to send back.
/// On rejection no further processing of the request happens.
///
/// # Implementations
///
/// - [`crate::infrastructure::shopify::SessionTokenGuard`] - platform session tokens (HS256)
#[async_trait]
pub trait SessionGuard: Send + Sync {
    async fn authenticate(&self, parts: &mut Parts) -> Result<Session, AuthRejection>;
}
