use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

const SERVICE: &str = "google_domains";

/// Google Domains availability client.
#[derive(Debug, Clone)]
pub struct GoogleDomainsClient {
    client: Client,
    base: Url,
    api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailability {
    pub domain_name: String,
    pub available: bool,
    #[serde(default)]
    pub price_usd: Option<f64>,
}

impl GoogleDomainsClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(SERVICE, base_url)?, api_key: api_key.into() })
    }

    /// Checks whether a domain can still be registered.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        domain: &str,
    ) -> Result<DomainAvailability, GatewayError> {
        // `./` keeps the colon from being parsed as a URL scheme when joining
        let url = join(SERVICE, &self.base, "./domains:search")?;
        let response = self
            .client
            .get(url)
            .query(&[("query", domain), ("key", &self.api_key)])
            .send()
            .await?;
        decode_json(SERVICE, response).await
    }
}
