//! DTOs for the onboarding action boundary.

use serde::{Deserialize, Serialize};

/// Form body of `POST /app`.
///
/// Only `intent` is read; any other field is ignored.
#[derive(Debug, Deserialize)]
pub struct ActionForm {
    pub intent: Option<String>,
}

/// Success payload: `{"url": "..."}`.
#[derive(Debug, Serialize)]
pub struct OnboardingLinkResponse {
    pub url: String,
}

/// Failure payload: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ActionErrorResponse {
    pub error: String,
}
