//! Shop domain validation.

use regex::Regex;

use crate::domain::entities::ShopDomain;

/// Platform-owned domains a shop may live under.
const PLATFORM_SHOP_DOMAINS: &[&str] = &["myshopify.com", "myshopify.io", "shop.dev"];

/// Decides which hostnames are acceptable shop domains.
///
/// Accepts `<name>.<platform domain>` plus any configured custom shop
/// domains. Input is trimmed, lowercased and may carry trailing slashes.
///
/// # Examples
///
/// ```ignore
/// let policy = ShopDomainPolicy::new(&[]).unwrap();
/// assert!(policy.sanitize("Acme.myshopify.com").is_some());
/// assert!(policy.sanitize("acme.example.com").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ShopDomainPolicy {
    pattern: Regex,
}

impl ShopDomainPolicy {
    /// Builds a policy that also accepts the given custom domains.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined pattern fails to compile.
    pub fn new(custom_domains: &[String]) -> Result<Self, regex::Error> {
        let domains = PLATFORM_SHOP_DOMAINS
            .iter()
            .map(|d| regex::escape(d))
            .chain(
                custom_domains
                    .iter()
                    .map(|d| regex::escape(&d.trim().to_ascii_lowercase())),
            )
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"^[a-z0-9][a-z0-9\-_]*\.({domains})/*$"))?;

        Ok(Self { pattern })
    }

    /// Returns the normalized shop domain, or `None` if not acceptable.
    pub fn sanitize(&self, raw: &str) -> Option<ShopDomain> {
        let candidate = raw.trim().to_ascii_lowercase();

        if !self.pattern.is_match(&candidate) {
            return None;
        }

        Some(ShopDomain::from_trusted(candidate.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_platform_domains() {
        let policy = ShopDomainPolicy::new(&[]).unwrap();

        assert_eq!(
            policy.sanitize("acme.myshopify.com").unwrap().as_str(),
            "acme.myshopify.com"
        );
        assert_eq!(
            policy.sanitize(" ACME-store.myshopify.com/ ").unwrap().as_str(),
            "acme-store.myshopify.com"
        );
        assert!(policy.sanitize("dev-shop.myshopify.io").is_some());
        assert!(policy.sanitize("preview.shop.dev").is_some());
    }

    #[test]
    fn test_rejects_foreign_or_malformed_domains() {
        let policy = ShopDomainPolicy::new(&[]).unwrap();

        assert!(policy.sanitize("").is_none());
        assert!(policy.sanitize("myshopify.com").is_none());
        assert!(policy.sanitize("acme.example.com").is_none());
        assert!(policy.sanitize("acme.myshopify.com.evil.io").is_none());
        assert!(policy.sanitize("-acme.myshopify.com").is_none());
        assert!(policy.sanitize("acme.myshopifyXcom").is_none());
        assert!(policy.sanitize("https://acme.myshopify.com").is_none());
    }

    #[test]
    fn test_custom_domain() {
        let policy = ShopDomainPolicy::new(&["Shops.Example.com".to_string()]).unwrap();

        assert_eq!(
            policy.sanitize("acme.shops.example.com").unwrap().as_str(),
            "acme.shops.example.com"
        );
        assert!(policy.sanitize("acme.shopsXexample.com").is_none());
        assert!(policy.sanitize("acme.myshopify.com").is_some());
    }
}
