//! Session guard backed by platform session tokens.
//!
//! Embedded admin pages receive a short-lived HS256 JWT either as
//! `Authorization: Bearer <token>` (script requests) or as the `id_token`
//! query parameter (document loads). The token is signed with the app's API
//! secret and names the shop in its `dest` claim.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{Method, request::Parts};
use axum_auth::AuthBearer;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::collections::HashMap;
use tracing::{debug, warn};
use url::{Url, form_urlencoded};

use crate::config::ShopifyAppConfig;
use crate::domain::entities::{Session, ShopDomain};
use crate::domain::session_guard::SessionGuard;
use crate::error::AuthRejection;
use crate::utils::shop_domain::ShopDomainPolicy;

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew when checking `exp` and `nbf`, in seconds.
pub const CLOCK_TOLERANCE_SECS: i64 = 10;

/// Path of the page that fetches a fresh token and reloads the app.
pub const BOUNCE_PATH: &str = "/auth/session-token";

#[derive(Debug, Deserialize)]
struct TokenHeader {
    alg: String,
}

/// Claims carried by a session token.
#[derive(Debug, Deserialize)]
pub struct SessionTokenClaims {
    pub iss: String,
    pub dest: String,
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub sid: Option<String>,
}

/// Why a session token was refused. Logged, never returned to the client.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is not a well-formed JWT")]
    Malformed,
    #[error("unsupported signing algorithm")]
    Algorithm,
    #[error("signature mismatch")]
    Signature,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("audience does not match the API key")]
    Audience,
    #[error("destination is not a valid shop domain")]
    Destination,
    #[error("issuer does not match the destination")]
    Issuer,
}

/// Verifies platform session tokens.
pub struct SessionTokenGuard {
    api_key: String,
    api_secret: String,
    shop_policy: ShopDomainPolicy,
}

impl SessionTokenGuard {
    pub fn new(api_key: String, api_secret: String, shop_policy: ShopDomainPolicy) -> Self {
        Self {
            api_key,
            api_secret,
            shop_policy,
        }
    }

    /// Builds a guard from the platform configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom shop domain produces an invalid pattern.
    pub fn from_config(config: &ShopifyAppConfig) -> Result<Self, regex::Error> {
        Ok(Self::new(
            config.api_key.clone(),
            config.api_secret.clone(),
            ShopDomainPolicy::new(&config.custom_shop_domains)?,
        ))
    }

    /// Verifies a token at the given Unix time and returns its shop and claims.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`TokenError`].
    pub fn verify_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<(ShopDomain, SessionTokenClaims), TokenError> {
        let mut segments = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed);
        };

        let header: TokenHeader = decode_segment(header_b64)?;
        if header.alg != "HS256" {
            return Err(TokenError::Algorithm);
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|_| TokenError::Signature)?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::Signature)?;

        let claims: SessionTokenClaims = decode_segment(payload_b64)?;

        if claims.exp + CLOCK_TOLERANCE_SECS < now {
            return Err(TokenError::Expired);
        }
        if claims.nbf - CLOCK_TOLERANCE_SECS > now {
            return Err(TokenError::NotYetValid);
        }
        if claims.aud != self.api_key {
            return Err(TokenError::Audience);
        }

        let dest_host = host_of(&claims.dest).ok_or(TokenError::Destination)?;
        let shop = self
            .shop_policy
            .sanitize(&dest_host)
            .ok_or(TokenError::Destination)?;

        if host_of(&claims.iss).as_deref() != Some(dest_host.as_str()) {
            return Err(TokenError::Issuer);
        }

        Ok((shop, claims))
    }

    /// Rejection for a request that carries no token at all.
    ///
    /// Document loads naming a valid shop are bounced to the token page;
    /// everything else gets a 401.
    fn reject_missing_token(
        &self,
        parts: &Parts,
        query: &HashMap<String, String>,
    ) -> AuthRejection {
        let shop = query.get("shop").and_then(|s| self.shop_policy.sanitize(s));

        match shop {
            Some(shop) if parts.method == Method::GET => {
                let reload = match parts.uri.query() {
                    Some(q) => format!("{}?{}", parts.uri.path(), q),
                    None => parts.uri.path().to_string(),
                };

                let mut bounce = form_urlencoded::Serializer::new(String::new());
                bounce.append_pair("shop", shop.as_str());
                if let Some(host) = query.get("host") {
                    bounce.append_pair("host", host);
                }
                bounce.append_pair("shopify-reload", &reload);

                AuthRejection::Bounce {
                    location: format!("{BOUNCE_PATH}?{}", bounce.finish()),
                }
            }
            _ => AuthRejection::InvalidSession {
                reason: "Missing session token",
            },
        }
    }
}

#[async_trait]
impl SessionGuard for SessionTokenGuard {
    async fn authenticate(&self, parts: &mut Parts) -> Result<Session, AuthRejection> {
        let query: HashMap<String, String> = parts
            .uri
            .query()
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        let bearer = AuthBearer::from_request_parts(parts, &())
            .await
            .ok()
            .map(|AuthBearer(token)| token);

        let Some(token) = bearer.or_else(|| query.get("id_token").cloned()) else {
            debug!(path = %parts.uri.path(), "Request without session token");
            return Err(self.reject_missing_token(parts, &query));
        };

        match self.verify_at(&token, Utc::now().timestamp()) {
            Ok((shop, claims)) => Ok(Session {
                shop,
                user_id: claims.sub,
                session_id: claims.sid,
                token,
            }),
            Err(e) => {
                warn!(reason = %e, "Rejected session token");
                Err(AuthRejection::InvalidSession {
                    reason: "Invalid session token",
                })
            }
        }
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

fn host_of(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()?
        .host_str()
        .map(|h| h.to_ascii_lowercase())
}
