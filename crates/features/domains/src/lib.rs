//! Domain registration feature slice.
//!
//! Stores registrations, queues them on the change feed, and drives the
//! four-step provisioning workflow (registrar order, DNS zone, name servers,
//! edge binding) through the outbound gateway clients.

mod error;
mod handlers;
mod models;
mod repository;
mod workflow;

pub use error::{DomainsError, DomainsErrorExt};
pub use models::{
    AvailabilityReport, CreateDomainRegistration, DomainRegistration,
    DomainRegistrationRequested, ProvisioningSteps, RegistrationStatus, is_valid_domain,
};
pub use repository::DomainsRepository;
pub use workflow::DomainProvisioner;

use ihub_database::{Database, SliceSchema};
use ihub_domain::config::GatewayConfig;
use ihub_feed::ChangeFeed;
use ihub_gateway::{
    DnsZoneClient, FrontDoorClient, GoogleDomainsClient, WhmcsClient, build_client,
};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "domains",
    r"
    DEFINE TABLE OVERWRITE domain_registration SCHEMALESS;
    DEFINE INDEX OVERWRITE domain_registration_upn ON TABLE domain_registration COLUMNS upn;
    DEFINE INDEX OVERWRITE domain_registration_domain ON TABLE domain_registration COLUMNS domain UNIQUE;
    ",
);

/// Domains feature state.
#[ihub_derive::ihub_slice]
pub struct Domains {
    pub repository: DomainsRepository,
    pub provisioner: Arc<DomainProvisioner>,
    pub availability: GoogleDomainsClient,
}

/// Initialize the domains feature and attach its provisioning trigger.
///
/// # Errors
/// Returns an error if the schema cannot be applied, a gateway client is
/// misconfigured, or a provisioning trigger is already attached.
pub async fn init(
    database: &Database,
    feed: &ChangeFeed,
    gateway: &GatewayConfig,
) -> Result<InitializedSlice, DomainsError> {
    database.apply_schema(&SCHEMA).await?;

    let http = build_client()?;
    let whmcs = WhmcsClient::new(
        http.clone(),
        &gateway.whmcs.url,
        gateway.whmcs.identifier.clone(),
        gateway.whmcs.secret.clone(),
    )?;
    let dns = DnsZoneClient::new(http.clone(), &gateway.dns.url, gateway.dns.token.clone())?;
    let front_door =
        FrontDoorClient::new(http.clone(), &gateway.front_door.url, gateway.front_door.token.clone())?;
    let availability = GoogleDomainsClient::new(
        http,
        &gateway.google_domains.url,
        gateway.google_domains.api_key.clone(),
    )?;

    let repository = DomainsRepository::new(database.clone());
    let provisioner = Arc::new(DomainProvisioner::new(
        repository.clone(),
        whmcs,
        dns,
        front_door,
        gateway.whmcs.registration_years,
    ));
    provisioner.spawn_trigger(feed)?;

    let inner = DomainsInner { repository, provisioner, availability };
    tracing::info!("Domains slice initialized");

    Ok(InitializedSlice::new(Domains::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_registration, handlers::list_registrations))
        .routes(routes!(
            handlers::get_registration,
            handlers::delete_registration
        ))
        .routes(routes!(handlers::complete_registration))
        .routes(routes!(handlers::check_availability))
}
