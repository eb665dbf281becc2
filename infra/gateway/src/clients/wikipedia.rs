use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

const SERVICE: &str = "wikipedia";

/// Wikipedia REST summary client. No credentials required.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    base: Url,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikiSummary {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}

impl WikipediaClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(client: Client, base_url: &str) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(SERVICE, base_url)? })
    }

    /// Fetches the lead-section summary of a page. Spaces in the title are
    /// folded to underscores the way the REST API expects.
    #[instrument(skip(self))]
    pub async fn summary(&self, title: &str) -> Result<WikiSummary, GatewayError> {
        let slug = title.trim().replace(' ', "_");
        let url = join(SERVICE, &self.base, &format!("page/summary/{slug}"))?;
        let response = self.client.get(url).send().await?;
        decode_json(SERVICE, response).await
    }
}
