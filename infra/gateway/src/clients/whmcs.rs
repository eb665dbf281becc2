use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

const SERVICE: &str = "whmcs";

/// WHMCS control-panel API client.
///
/// WHMCS exposes a single RPC endpoint taking form-encoded `action` requests
/// and answering JSON with a `result` discriminator.
#[derive(Debug, Clone)]
pub struct WhmcsClient {
    client: Client,
    endpoint: Url,
    identifier: String,
    secret: String,
}

/// Envelope every WHMCS action answers with.
#[derive(Debug, Deserialize)]
struct WhmcsResponse {
    result: String,
    message: Option<String>,
    #[serde(rename = "orderid")]
    order_id: Option<u64>,
}

/// Confirmation of a placed domain order.
#[derive(Debug, Clone)]
pub struct WhmcsOrder {
    pub domain: String,
    pub order_id: Option<u64>,
}

impl WhmcsClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        identifier: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let base = parse_base(SERVICE, base_url)?;
        let endpoint = join(SERVICE, &base, "includes/api.php")?;
        Ok(Self { client, endpoint, identifier: identifier.into(), secret: secret.into() })
    }

    /// Registers a domain for the given period.
    ///
    /// # Errors
    /// Surfaces transport failures and WHMCS-level `result=error` answers as
    /// [`GatewayError`].
    #[instrument(skip(self))]
    pub async fn register_domain(
        &self,
        domain: &str,
        years: u32,
    ) -> Result<WhmcsOrder, GatewayError> {
        let response = self
            .call(&[
                ("action", "DomainRegister"),
                ("domain", domain),
                ("regperiod", &years.to_string()),
            ])
            .await?;
        info!(domain, order_id = response.order_id, "WHMCS registration accepted");
        Ok(WhmcsOrder { domain: domain.to_owned(), order_id: response.order_id })
    }

    /// Points a registered domain at the given name servers.
    ///
    /// WHMCS accepts up to five; extras are dropped.
    #[instrument(skip(self, nameservers))]
    pub async fn update_nameservers(
        &self,
        domain: &str,
        nameservers: &[String],
    ) -> Result<(), GatewayError> {
        if nameservers.is_empty() {
            return Err(GatewayError::Internal {
                message: "At least one name server is required".into(),
                context: Some(SERVICE.into()),
            });
        }

        let mut params = vec![
            ("action".to_owned(), "DomainUpdateNameservers".to_owned()),
            ("domain".to_owned(), domain.to_owned()),
        ];
        for (idx, ns) in nameservers.iter().take(5).enumerate() {
            params.push((format!("ns{}", idx + 1), ns.clone()));
        }

        self.call(&params).await?;
        info!(domain, count = nameservers.len().min(5), "WHMCS name servers updated");
        Ok(())
    }

    async fn call<K, V>(&self, params: &[(K, V)]) -> Result<WhmcsResponse, GatewayError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form: Vec<(&str, &str)> = vec![
            ("identifier", self.identifier.as_str()),
            ("secret", self.secret.as_str()),
            ("responsetype", "json"),
        ];
        for (k, v) in params {
            form.push((k.as_ref(), v.as_ref()));
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?;
        let envelope: WhmcsResponse = decode_json(SERVICE, response).await?;

        if envelope.result != "success" {
            return Err(GatewayError::Upstream {
                service: SERVICE.into(),
                status: 200,
                message: envelope
                    .message
                    .unwrap_or_else(|| String::from("WHMCS reported an error"))
                    .into(),
                context: None,
            });
        }
        Ok(envelope)
    }
}
