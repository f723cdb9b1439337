//! Persisted onboarding completion state.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use validator::Validate;

use super::shop::ShopDomain;

static ACCOUNT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^acct_[A-Za-z0-9]+$").expect("valid account id regex"));

/// A shop whose payment account onboarding has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStatus {
    pub shop: ShopDomain,
    pub stripe_account_id: String,
    pub completed_at: DateTime<Utc>,
}

/// Input for marking a shop's onboarding as complete.
#[derive(Debug, Clone, Validate)]
pub struct NewSetupCompletion {
    pub shop: ShopDomain,

    /// Connected account identifier, `acct_` followed by alphanumerics.
    #[validate(length(max = 255))]
    #[validate(regex(path = "*ACCOUNT_ID_REGEX", message = "Expected an id like acct_123"))]
    pub stripe_account_id: String,
}

impl NewSetupCompletion {
    pub fn new(shop: ShopDomain, stripe_account_id: impl Into<String>) -> Self {
        Self {
            shop,
            stripe_account_id: stripe_account_id.into().trim().to_string(),
        }
    }
}
