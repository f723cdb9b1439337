//! Business logic services for the application layer.

pub mod onboarding_service;
pub mod setup_service;

pub use onboarding_service::OnboardingService;
pub use setup_service::SetupService;
