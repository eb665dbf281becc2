//! # Gateway Infrastructure
//!
//! Outbound HTTP clients for every third-party integration, all sharing a
//! single connection-pooled [`reqwest::Client`].
//!
//! ## Integrations
//! - **WHMCS** — domain registration and name-server updates.
//! - **Google Domains** — availability lookups.
//! - **DNS zones** — zone provisioning with delegated name servers.
//! - **Front Door** — edge custom-domain binding.
//! - **Stripe** — customers and hosted checkout.
//! - **Amazon / Penguin Random House** — book catalogue search.
//! - **Wikipedia** — page summaries.
//!
//! All failures fold into [`GatewayError`], which the API layer maps to a
//! single upstream-failure status.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ihub_gateway::{WikipediaClient, build_client};
//!
//! # async fn run() -> Result<(), ihub_gateway::GatewayError> {
//! let http = build_client()?;
//! let wiki = WikipediaClient::new(http, "https://en.wikipedia.org/api/rest_v1")?;
//! let summary = wiki.summary("Ursula K. Le Guin").await?;
//! println!("{}", summary.title);
//! # Ok(())
//! # }
//! ```

mod clients;
mod error;
mod http;

pub use clients::{
    AmazonBooksClient, BookHit, BookSource, CheckoutSession, DnsZone, DnsZoneClient,
    DomainAvailability, EdgeBinding, FrontDoorClient, GoogleDomainsClient, PrhClient,
    StripeClient, StripeCustomer, WhmcsClient, WhmcsOrder, WikiSummary, WikipediaClient,
};
pub use error::{GatewayError, GatewayErrorExt};
pub use http::build_client;
