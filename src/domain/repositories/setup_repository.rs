//! Repository trait for persisted onboarding completion.

use crate::domain::entities::{NewSetupCompletion, SetupStatus, ShopDomain};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-shop onboarding completion.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSetupRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemorySetupRepository`] - process-local fallback
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SetupRepository: Send + Sync {
    /// Returns the completion record for a shop, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, shop: &ShopDomain) -> Result<Option<SetupStatus>, AppError>;

    /// Records (or replaces) the completion record for a shop.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn mark_complete(&self, completion: NewSetupCompletion)
    -> Result<SetupStatus, AppError>;

    /// Removes a shop's completion record.
    ///
    /// Returns `true` if a record existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn reset(&self, shop: &ShopDomain) -> Result<bool, AppError>;

    /// Lists every completed shop, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<SetupStatus>, AppError>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> bool;
}
