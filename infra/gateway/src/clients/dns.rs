use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use url::Url;

const SERVICE: &str = "dns";

/// DNS-zone management client (Azure DNS shaped REST surface).
#[derive(Debug, Clone)]
pub struct DnsZoneClient {
    client: Client,
    base: Url,
    token: String,
}

/// A provisioned zone together with the name servers delegated to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsZone {
    pub name: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
}

impl DnsZoneClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(SERVICE, base_url)?, token: token.into() })
    }

    /// Creates (or overwrites) the zone for a domain and returns its
    /// delegated name servers.
    #[instrument(skip(self))]
    pub async fn create_zone(&self, domain: &str) -> Result<DnsZone, GatewayError> {
        let url = join(SERVICE, &self.base, &format!("zones/{domain}"))?;
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "location": "global" }))
            .send()
            .await?;
        let zone: DnsZone = decode_json(SERVICE, response).await?;
        info!(domain, name_servers = zone.name_servers.len(), "DNS zone provisioned");
        Ok(zone)
    }
}
