//! Tenant identity: a validated shop domain.

use std::fmt;

/// A storefront domain the app is installed on, e.g. `acme.myshopify.com`.
///
/// Only constructed through [`crate::utils::shop_domain::ShopDomainPolicy`]
/// (or from already-trusted storage), so holders can rely on it being a
/// lowercase, policy-approved hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Rebuilds a shop domain read back from trusted storage.
    pub fn from_trusted(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
