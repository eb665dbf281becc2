use crate::error::BillingError;
use crate::models::{BillingCustomer, Checkout};
use ihub_domain::config::StripeConfig;
use ihub_gateway::StripeClient;
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, info};

/// Cached customer bindings live this long before Stripe is asked again.
const CUSTOMER_TTL: Duration = Duration::from_secs(60 * 60);
const CUSTOMER_CAPACITY: u64 = 10_000;

/// Find-or-create customer resolution and hosted checkout, with a
/// principal-to-customer cache in front of Stripe.
#[derive(Debug, Clone)]
pub struct BillingService {
    stripe: StripeClient,
    config: StripeConfig,
    customers: Cache<String, String>,
}

impl BillingService {
    #[must_use]
    pub fn new(stripe: StripeClient, config: StripeConfig) -> Self {
        let customers =
            Cache::builder().max_capacity(CUSTOMER_CAPACITY).time_to_live(CUSTOMER_TTL).build();
        Self { stripe, config, customers }
    }

    /// Resolves the Stripe customer bound to `upn`, creating one on first
    /// contact.
    ///
    /// # Errors
    /// Returns [`BillingError::Gateway`] when Stripe cannot be reached.
    pub async fn customer_for(&self, upn: &str) -> Result<BillingCustomer, BillingError> {
        let id = self.customer_id_for(upn).await?;
        Ok(BillingCustomer { id, email: upn.to_owned() })
    }

    /// Opens a hosted checkout session for the caller's customer, with the
    /// subscription price and redirect URLs from configuration.
    ///
    /// # Errors
    /// Returns [`BillingError::Gateway`] when Stripe cannot be reached.
    pub async fn checkout_for(&self, upn: &str) -> Result<Checkout, BillingError> {
        let customer_id = self.customer_id_for(upn).await?;
        let session = self
            .stripe
            .create_checkout_session(
                &customer_id,
                &self.config.price_id,
                &self.config.success_url,
                &self.config.cancel_url,
            )
            .await?;
        info!(customer = %customer_id, session = %session.id, "Checkout session opened");
        Ok(Checkout { id: session.id, url: session.url })
    }

    async fn customer_id_for(&self, upn: &str) -> Result<String, BillingError> {
        if let Some(id) = self.customers.get(upn).await {
            debug!(upn, customer = %id, "Customer resolved from cache");
            return Ok(id);
        }

        let customer = match self.stripe.find_customer(upn).await? {
            Some(existing) => existing,
            None => self.stripe.create_customer(upn).await?,
        };
        self.customers.insert(upn.to_owned(), customer.id.clone()).await;
        Ok(customer.id)
    }
}
