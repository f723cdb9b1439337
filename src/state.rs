//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{OnboardingService, SetupService};
use crate::config::ShopifyAppConfig;
use crate::domain::session_guard::SessionGuard;

/// Immutable per-process state, cloned cheaply into every request.
#[derive(Clone)]
pub struct AppState {
    pub shopify: Arc<ShopifyAppConfig>,
    pub session_guard: Arc<dyn SessionGuard>,
    pub onboarding_service: Arc<OnboardingService>,
    pub setup_service: Arc<SetupService>,
}

impl AppState {
    pub fn new(
        shopify: Arc<ShopifyAppConfig>,
        session_guard: Arc<dyn SessionGuard>,
        onboarding_service: Arc<OnboardingService>,
        setup_service: Arc<SetupService>,
    ) -> Self {
        Self {
            shopify,
            session_guard,
            onboarding_service,
            setup_service,
        }
    }
}
