//! View state of the onboarding panel.
//!
//! ```text
//! Idle --submit--> Pending --resolve--> Ready(url) | Failed(error)
//!                     ^                        |
//!                     +--------submit----------+
//! ```
//!
//! Transitions happen only on an explicit submit or a completed request.
//! There is no correlation between submissions and responses: whichever
//! response resolves last is what the panel shows.

use crate::domain::onboarding::{OnboardingError, OnboardingLink};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Pending,
    Ready(String),
    Failed(String),
}

impl ViewState {
    /// The user asked for a link. Supersedes any previous result.
    pub fn submit(&mut self) {
        *self = ViewState::Pending;
    }

    /// A request finished. Always overwrites the current state.
    pub fn resolve(&mut self, outcome: &Result<OnboardingLink, OnboardingError>) {
        *self = Self::from_outcome(outcome);
    }

    pub fn from_outcome(outcome: &Result<OnboardingLink, OnboardingError>) -> Self {
        match outcome {
            Ok(link) => ViewState::Ready(link.url.clone()),
            Err(e) => ViewState::Failed(e.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ViewState::Pending)
    }

    pub fn link_url(&self) -> Option<&str> {
        match self {
            ViewState::Ready(url) => Some(url),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str) -> Result<OnboardingLink, OnboardingError> {
        Ok(OnboardingLink {
            url: url.to_string(),
        })
    }

    #[test]
    fn test_happy_path() {
        let mut state = ViewState::default();
        assert_eq!(state, ViewState::Idle);

        state.submit();
        assert!(state.is_pending());

        state.resolve(&link("https://connect.example/abc123"));
        assert_eq!(state.link_url(), Some("https://connect.example/abc123"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut state = ViewState::Idle;

        state.submit();
        state.resolve(&Err(OnboardingError::Backend));
        assert_eq!(state.error(), Some("Backend responded with an error."));

        state.submit();
        assert_eq!(state, ViewState::Pending);
        assert_eq!(state.error(), None);

        state.resolve(&link("https://connect.example/next"));
        assert_eq!(state.link_url(), Some("https://connect.example/next"));
    }

    #[test]
    fn test_new_submission_supersedes_ready() {
        let mut state = ViewState::Ready("https://connect.example/old".to_string());

        state.submit();

        assert!(state.is_pending());
        assert_eq!(state.link_url(), None);
    }

    #[test]
    fn test_last_resolution_wins() {
        let mut state = ViewState::Idle;

        // Two rapid clicks; the second request resolves first.
        state.submit();
        state.submit();
        state.resolve(&link("https://connect.example/second"));
        state.resolve(&link("https://connect.example/first"));

        assert_eq!(state.link_url(), Some("https://connect.example/first"));

        state.resolve(&Err(OnboardingError::Transport));
        assert_eq!(state.error(), Some("Could not connect to backend."));
    }
}
