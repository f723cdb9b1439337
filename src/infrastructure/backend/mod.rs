//! Outbound integration with the payment onboarding backend.

pub mod http_onboarding_client;

pub use http_onboarding_client::{HttpOnboardingClient, create_client};
