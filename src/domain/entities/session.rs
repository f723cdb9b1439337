//! Authenticated admin session.

use super::shop::ShopDomain;

/// Request-scoped admin session produced by the session guard.
///
/// Never persisted. Handlers read the shop and nothing else; the token is
/// kept only so it can be forwarded if a downstream call ever needs it.
#[derive(Debug, Clone)]
pub struct Session {
    pub shop: ShopDomain,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
    pub token: String,
}

impl Session {
    pub fn new(shop: ShopDomain, token: impl Into<String>) -> Self {
        Self {
            shop,
            user_id: None,
            session_id: None,
            token: token.into(),
        }
    }
}
