//! Application layer services implementing business logic.
//!
//! Services consume domain traits and give HTTP handlers and the admin CLI a
//! small, typed API.
//!
//! # Available Services
//!
//! - [`services::onboarding_service::OnboardingService`] - Intent dispatch and onboarding link requests
//! - [`services::setup_service::SetupService`] - Persisted onboarding completion per shop

pub mod services;
