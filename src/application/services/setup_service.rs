//! Onboarding completion (setup status) service.

use std::sync::Arc;
use validator::Validate;

use crate::domain::entities::{NewSetupCompletion, SetupStatus, ShopDomain};
use crate::domain::repositories::SetupRepository;
use crate::error::AppError;
use serde_json::json;

/// Reads and records whether a shop has finished payment onboarding.
pub struct SetupService {
    repository: Arc<dyn SetupRepository>,
}

impl SetupService {
    pub fn new(repository: Arc<dyn SetupRepository>) -> Self {
        Self { repository }
    }

    /// Returns the completion record for a shop, or `None` if setup is pending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn status(&self, shop: &ShopDomain) -> Result<Option<SetupStatus>, AppError> {
        self.repository.find(shop).await
    }

    /// Marks a shop's onboarding as complete with the given account id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the account id is malformed.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn complete(
        &self,
        shop: ShopDomain,
        stripe_account_id: &str,
    ) -> Result<SetupStatus, AppError> {
        let completion = NewSetupCompletion::new(shop, stripe_account_id);
        completion.validate()?;

        let status = self.repository.mark_complete(completion).await?;
        tracing::info!(
            shop = %status.shop,
            account = %status.stripe_account_id,
            "Onboarding marked complete"
        );

        Ok(status)
    }

    /// Clears a shop's completion record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shop has no record.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn reset(&self, shop: &ShopDomain) -> Result<(), AppError> {
        if !self.repository.reset(shop).await? {
            return Err(AppError::not_found(
                "Setup not found",
                json!({ "shop": shop.as_str() }),
            ));
        }

        Ok(())
    }

    /// Lists all shops with completed onboarding.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list(&self) -> Result<Vec<SetupStatus>, AppError> {
        self.repository.list().await
    }

    /// Checks that the setup store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
