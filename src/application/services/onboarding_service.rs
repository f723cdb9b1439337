//! Onboarding link acquisition service.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::Session;
use crate::domain::onboarding::{Intent, OnboardingError, OnboardingLink, OnboardingLinkRequester};

/// Dispatches onboarding intents for an authenticated session.
///
/// The shop is taken from the [`Session`] only, never from request input.
/// Outcomes are counted in `onboarding_link_requests_total{outcome}` through
/// the `metrics` facade. No recorder is installed by this crate, so the
/// counter is a no-op until the embedding process installs an exporter.
pub struct OnboardingService {
    requester: Arc<dyn OnboardingLinkRequester>,
}

impl OnboardingService {
    pub fn new(requester: Arc<dyn OnboardingLinkRequester>) -> Self {
        Self { requester }
    }

    /// Executes the action selected by a raw intent value.
    ///
    /// # Errors
    ///
    /// Returns [`OnboardingError::UnrecognizedIntent`] for anything but
    /// `create_connect_link` without contacting the backend; otherwise any
    /// error from [`Self::request_onboarding_link`].
    pub async fn handle_intent(
        &self,
        session: &Session,
        intent: Option<&str>,
    ) -> Result<OnboardingLink, OnboardingError> {
        match Intent::parse_optional(intent) {
            Ok(Intent::CreateConnectLink) => self.request_onboarding_link(session).await,
            Err(e) => {
                warn!(
                    shop = %session.shop,
                    intent = intent.unwrap_or("<missing>"),
                    "Unrecognized intent"
                );
                let outcome = Err(e);
                record_outcome(&outcome);
                outcome
            }
        }
    }

    /// Requests a hosted onboarding link for the session's shop.
    ///
    /// # Errors
    ///
    /// Returns the requester's [`OnboardingError`] unchanged.
    pub async fn request_onboarding_link(
        &self,
        session: &Session,
    ) -> Result<OnboardingLink, OnboardingError> {
        let outcome = self.requester.request_onboarding_link(&session.shop).await;

        if outcome.is_ok() {
            info!(shop = %session.shop, "Issued onboarding link");
        }

        record_outcome(&outcome);
        outcome
    }
}

fn record_outcome(outcome: &Result<OnboardingLink, OnboardingError>) {
    // No-op unless the process has installed a metrics recorder.
    metrics::counter!("onboarding_link_requests_total", "outcome" => outcome_label(outcome))
        .increment(1);
}

fn outcome_label(outcome: &Result<OnboardingLink, OnboardingError>) -> &'static str {
    match outcome {
        Ok(_) => "success",
        Err(e) => e.kind(),
    }
}
