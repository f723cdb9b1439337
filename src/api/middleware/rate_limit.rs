//! Per-IP rate limiting with a token bucket.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket quota applied to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Public pages (bounce page).
    ///
    /// - **Rate**: 2 requests per second
    /// - **Burst**: 100 requests
    Public,
    /// The embedded app. Every `POST /app` costs one backend call.
    ///
    /// - **Rate**: 1 request per second
    /// - **Burst**: 10 requests
    Secure,
}

impl Tier {
    fn quota(self) -> (u64, u32) {
        match self {
            Tier::Public => (2, 100),
            Tier::Secure => (1, 10),
        }
    }
}

fn governor<K: KeyExtractor>(
    key_extractor: K,
    tier: Tier,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let (per_second, burst_size) = tier.quota();
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("non-zero rate limit quota"),
    );

    GovernorLayer::new(governor_conf)
}

/// Wraps `router` in a rate limiter for `tier`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address. The router must be
///   served with connect info.
/// - `behind_proxy = true`: `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
///   falling back to the peer address.
///
/// # Example
///
/// ```rust,ignore
/// let embedded = rate_limit::apply(web::routes::embedded_routes(), Tier::Secure, false);
/// ```
pub fn apply<S>(router: Router<S>, tier: Tier, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(governor(SmartIpKeyExtractor, tier))
    } else {
        router.layer(governor(PeerIpKeyExtractor, tier))
    }
}
