//! Billing feature slice: Stripe customers and hosted checkout.

mod error;
mod handlers;
mod models;
mod service;

pub use error::{BillingError, BillingErrorExt};
pub use models::{BillingCustomer, Checkout};
pub use service::BillingService;

use ihub_domain::config::StripeConfig;
use ihub_gateway::{StripeClient, build_client};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Billing feature state.
#[ihub_derive::ihub_slice]
pub struct Billing {
    pub service: BillingService,
}

/// Initialize the billing feature.
///
/// # Errors
/// Returns an error when the Stripe client is misconfigured.
pub fn init(stripe: &StripeConfig) -> Result<InitializedSlice, BillingError> {
    let http = build_client()?;
    let client = StripeClient::new(http, &stripe.url, stripe.secret_key.clone())?;

    let inner = BillingInner { service: BillingService::new(client, stripe.clone()) };
    tracing::info!("Billing slice initialized");

    Ok(InitializedSlice::new(Billing::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::get_customer))
        .routes(routes!(handlers::create_checkout))
}
