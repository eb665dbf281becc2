use crate::error::GatewayError;
use crate::http::{decode_json, join, parse_base};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};
use url::Url;

const SERVICE: &str = "stripe";

/// Stripe billing client.
///
/// Stripe takes form-encoded bodies and authenticates with the secret key as
/// a bearer token.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    base: Url,
    secret_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerList {
    data: Vec<StripeCustomer>,
}

impl StripeClient {
    /// # Errors
    /// Returns [`GatewayError::Configuration`] for an unparsable base URL.
    pub fn new(
        client: Client,
        base_url: &str,
        secret_key: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        Ok(Self { client, base: parse_base(SERVICE, base_url)?, secret_key: secret_key.into() })
    }

    /// Looks a customer up by e-mail. Stripe has no uniqueness guarantee on
    /// e-mail, the first match wins.
    #[instrument(skip(self))]
    pub async fn find_customer(
        &self,
        email: &str,
    ) -> Result<Option<StripeCustomer>, GatewayError> {
        let url = join(SERVICE, &self.base, "v1/customers")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.secret_key)
            .query(&[("email", email), ("limit", "1")])
            .send()
            .await?;
        let list: CustomerList = decode_json(SERVICE, response).await?;
        Ok(list.data.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn create_customer(&self, email: &str) -> Result<StripeCustomer, GatewayError> {
        let url = join(SERVICE, &self.base, "v1/customers")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&[("email", email)])
            .send()
            .await?;
        let customer: StripeCustomer = decode_json(SERVICE, response).await?;
        info!(customer = %customer.id, "Stripe customer created");
        Ok(customer)
    }

    /// Opens a hosted checkout session for an existing customer.
    #[instrument(skip(self, success_url, cancel_url))]
    pub async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, GatewayError> {
        let url = join(SERVICE, &self.base, "v1/checkout/sessions")?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("mode", "subscription"),
                ("customer", customer_id),
                ("line_items[0][price]", price_id),
                ("line_items[0][quantity]", "1"),
                ("success_url", success_url),
                ("cancel_url", cancel_url),
            ])
            .send()
            .await?;
        let session: CheckoutSession = decode_json(SERVICE, response).await?;
        info!(session = %session.id, "Stripe checkout session created");
        Ok(session)
    }
}
