//! HTTP client for the payment onboarding backend.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::config::BackendConfig;
use crate::domain::entities::ShopDomain;
use crate::domain::onboarding::{OnboardingError, OnboardingLink, OnboardingLinkRequester};

const ONBOARDING_LINK_PATH: &str = "onboarding-link";

/// Builds the shared outbound HTTP client.
///
/// One client is created at startup and reused, so connections are pooled
/// across clicks.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn create_client(config: &BackendConfig) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Requests onboarding links with `GET <base>/onboarding-link?shop=<shop>`.
///
/// Exactly one request per call, no retry, no caching. Every failure is
/// logged with its diagnostic detail and reduced to an [`OnboardingError`].
pub struct HttpOnboardingClient {
    client: Client,
    endpoint: Url,
}

impl HttpOnboardingClient {
    /// Creates a client for the backend rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL that can carry a path.
    pub fn new(client: Client, base_url: &str) -> anyhow::Result<Self> {
        let mut endpoint = Url::parse(base_url)?;

        endpoint
            .path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Backend URL cannot be a base: {base_url}"))?
            .pop_if_empty()
            .push(ONBOARDING_LINK_PATH);

        Ok(Self { client, endpoint })
    }

    /// Builds the client and its connection pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &BackendConfig) -> anyhow::Result<Self> {
        Self::new(create_client(config)?, &config.base_url)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The backend address for a shop, with the shop as an encoded query parameter.
    pub fn endpoint_for(&self, shop: &ShopDomain) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("shop", shop.as_str());
        url
    }
}

#[async_trait]
impl OnboardingLinkRequester for HttpOnboardingClient {
    async fn request_onboarding_link(
        &self,
        shop: &ShopDomain,
    ) -> Result<OnboardingLink, OnboardingError> {
        let url = self.endpoint_for(shop);
        debug!(%shop, %url, "Requesting onboarding link");

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(%shop, error = %e, "Error connecting to backend");
            OnboardingError::Transport
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            error!(%shop, %status, %body, "Failed to fetch onboarding link");
            return Err(OnboardingError::Backend);
        }

        let body = response.bytes().await.map_err(|e| {
            error!(%shop, error = %e, "Error reading backend response");
            OnboardingError::Transport
        })?;

        parse_link(&body).inspect_err(|e| {
            error!(
                %shop,
                body = %String::from_utf8_lossy(&body),
                kind = e.kind(),
                "Invalid response from backend"
            );
        })
    }
}

/// Classifies a 2xx body.
///
/// A body that does not decode as JSON, or decodes to `null`, is a
/// [`OnboardingError::Transport`] failure. Any other JSON value needs a
/// non-empty string `url`, otherwise it is [`OnboardingError::MalformedResponse`].
fn parse_link(body: &[u8]) -> Result<OnboardingLink, OnboardingError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| OnboardingError::Transport)?;

    if payload.is_null() {
        return Err(OnboardingError::Transport);
    }

    match payload.get("url") {
        Some(Value::String(url)) if !url.is_empty() => Ok(OnboardingLink { url: url.clone() }),
        _ => Err(OnboardingError::MalformedResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpOnboardingClient {
        HttpOnboardingClient::new(Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_for_shop() {
        let shop = ShopDomain::from_trusted("acme.myshopify.com");

        assert_eq!(
            client("http://backend:8080/shezaar/stripe")
                .endpoint_for(&shop)
                .as_str(),
            "http://backend:8080/shezaar/stripe/onboarding-link?shop=acme.myshopify.com"
        );
        assert_eq!(
            client("http://backend:8080/shezaar/stripe/")
                .endpoint_for(&shop)
                .as_str(),
            "http://backend:8080/shezaar/stripe/onboarding-link?shop=acme.myshopify.com"
        );
        assert_eq!(
            client("http://backend:8080").endpoint_for(&shop).as_str(),
            "http://backend:8080/onboarding-link?shop=acme.myshopify.com"
        );
    }

    #[test]
    fn test_endpoint_encodes_shop() {
        let shop = ShopDomain::from_trusted("a&b=c");

        assert_eq!(
            client("http://backend").endpoint_for(&shop).query(),
            Some("shop=a%26b%3Dc")
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(HttpOnboardingClient::new(Client::new(), "mailto:ops@example.com").is_err());
        assert!(HttpOnboardingClient::new(Client::new(), "not a url").is_err());
    }

    #[test]
    fn test_parse_link() {
        assert_eq!(
            parse_link(br#"{"url":"https://connect.example/abc123"}"#),
            Ok(OnboardingLink {
                url: "https://connect.example/abc123".to_string()
            })
        );
        assert_eq!(
            parse_link(br#"{"url":"not even a url","extra":1}"#).map(|l| l.url),
            Ok("not even a url".to_string())
        );
    }

    #[test]
    fn test_parse_link_malformed_json_values() {
        let bodies: [&[u8]; 6] = [
            br#"{}"#,
            br#"{"url":null}"#,
            br#"{"url":42}"#,
            br#"{"url":""}"#,
            br#"["https://connect.example"]"#,
            b"42",
        ];

        for body in bodies {
            assert_eq!(
                parse_link(body),
                Err(OnboardingError::MalformedResponse),
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_parse_link_undecodable_body_is_transport() {
        let bodies: [&[u8]; 4] = [b"<html>oops</html>", b"", b"null", b" null\n"];

        for body in bodies {
            assert_eq!(
                parse_link(body),
                Err(OnboardingError::Transport),
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
