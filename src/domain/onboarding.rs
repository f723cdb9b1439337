//! Onboarding link acquisition: intents, results and the requester contract.

use async_trait::async_trait;
use std::str::FromStr;

use crate::domain::entities::ShopDomain;

/// Intent tag selecting the server-side action branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CreateConnectLink,
}

impl Intent {
    pub const CREATE_CONNECT_LINK: &'static str = "create_connect_link";

    /// Parses an optional form value. Anything but a recognized tag is rejected.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, OnboardingError> {
        raw.ok_or(OnboardingError::UnrecognizedIntent)?.parse()
    }
}

impl FromStr for Intent {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::CREATE_CONNECT_LINK => Ok(Self::CreateConnectLink),
            _ => Err(OnboardingError::UnrecognizedIntent),
        }
    }
}

/// Hosted onboarding URL issued by the backend. Opaque: never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingLink {
    pub url: String,
}

/// Failure taxonomy of the onboarding action.
///
/// Messages are user-visible and kept generic; diagnostic detail only goes
/// to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Could not connect to backend.")]
    Transport,
    #[error("Backend responded with an error.")]
    Backend,
    #[error("Invalid onboarding link response.")]
    MalformedResponse,
    #[error("Invalid intent")]
    UnrecognizedIntent,
}

impl OnboardingError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OnboardingError::Transport => "transport_error",
            OnboardingError::Backend => "backend_error",
            OnboardingError::MalformedResponse => "malformed_response",
            OnboardingError::UnrecognizedIntent => "unrecognized_intent",
        }
    }
}

/// Obtains a hosted onboarding link for a shop from the payment backend.
///
/// Implementations issue exactly one outbound request per call, never retry,
/// and convert every failure into an [`OnboardingError`].
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpOnboardingClient`] - HTTP backend client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingLinkRequester: Send + Sync {
    async fn request_onboarding_link(
        &self,
        shop: &ShopDomain,
    ) -> Result<OnboardingLink, OnboardingError>;
}
