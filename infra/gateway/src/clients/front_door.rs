use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use url::Url;

const SERVICE: &str = "front_door";

/// Edge (Front Door) custom-domain binding client.
#[derive(Debug, Clone)]
pub struct FrontDoorClient {
    client: Client,
    base: Url,
    token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeBinding {
    pub host_name: String,
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

impl FrontDoorClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(SERVICE, base_url)?, token: token.into() })
    }

    /// Binds a custom domain to the edge endpoint.
    #[instrument(skip(self))]
    pub async fn bind_domain(&self, domain: &str) -> Result<EdgeBinding, GatewayError> {
        let url = join(SERVICE, &self.base, &format!("customDomains/{domain}"))?;
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "hostName": domain }))
            .send()
            .await?;
        let binding: EdgeBinding = decode_json(SERVICE, response).await?;
        info!(
            domain,
            state = binding.provisioning_state.as_deref().unwrap_or("unknown"),
            "Edge binding accepted"
        );
        Ok(binding)
    }
}
