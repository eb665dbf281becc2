use crate::error::DomainsError;
use crate::models::{DomainRegistration, DomainRegistrationRequested, RegistrationStatus};
use crate::repository::DomainsRepository;
use ihub_feed::{ChangeFeed, FeedReceiverExt};
use ihub_gateway::{DnsZoneClient, FrontDoorClient, WhmcsClient};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Queue depth for registration change records awaiting the worker.
const QUEUE_CAPACITY: usize = 64;

/// Best-effort orchestration of the four provisioning steps.
///
/// Every run walks the steps in order, skipping those whose flag is already
/// set. A failing step is recorded in `last_error` and skipped on this run;
/// the remaining steps are still attempted, except that nothing past step one
/// makes sense for a domain the registrar never accepted.
#[derive(Debug, Clone)]
pub struct DomainProvisioner {
    repository: DomainsRepository,
    whmcs: WhmcsClient,
    dns: DnsZoneClient,
    front_door: FrontDoorClient,
    registration_years: u32,
}

impl DomainProvisioner {
    #[must_use]
    pub const fn new(
        repository: DomainsRepository,
        whmcs: WhmcsClient,
        dns: DnsZoneClient,
        front_door: FrontDoorClient,
        registration_years: u32,
    ) -> Self {
        Self { repository, whmcs, dns, front_door, registration_years }
    }

    /// Attaches the single trigger worker draining registration change
    /// records, mirroring a change-feed trigger firing on inserts.
    ///
    /// # Errors
    /// Returns [`DomainsError::Feed`] when a trigger is already attached.
    pub fn spawn_trigger(self: &Arc<Self>, feed: &ChangeFeed) -> Result<(), DomainsError> {
        let mut rx = feed.attach_trigger::<DomainRegistrationRequested>(QUEUE_CAPACITY)?;
        let provisioner = Arc::clone(self);

        tokio::spawn(async move {
            while let Some(change) = rx.next_change().await {
                if let Err(err) = provisioner.run(&change.id).await {
                    error!(id = %change.id, %err, "Provisioning run failed");
                }
            }
            info!("Domain provisioning trigger stopped");
        });
        Ok(())
    }

    /// Executes one provisioning run for a stored registration.
    ///
    /// # Errors
    /// Returns [`DomainsError::NotFound`] for an unknown id and
    /// [`DomainsError::Database`] when progress cannot be persisted. Upstream
    /// failures do not error the run; they land in `last_error`.
    pub async fn run(&self, id: &str) -> Result<DomainRegistration, DomainsError> {
        let registration = self.repository.get(id).await?.ok_or_else(|| {
            DomainsError::NotFound { message: id.to_owned().into(), context: None }
        })?;

        if registration.steps.is_complete() {
            return Ok(registration);
        }

        let domain = registration.domain.clone();
        let mut steps = registration.steps;
        let mut name_servers = registration.name_servers.clone();
        let mut last_error = registration.last_error.clone();

        if !steps.registered {
            match self.whmcs.register_domain(&domain, self.registration_years).await {
                Ok(order) => {
                    info!(domain, order_id = order.order_id, "Domain registered");
                    steps.registered = true;
                }
                Err(err) => {
                    warn!(domain, %err, "Registrar order failed");
                    last_error = Some(err.to_string());
                }
            }
        }

        // Nothing past registration makes sense for an unowned domain.
        if steps.registered {
            if !steps.zone_created {
                match self.dns.create_zone(&domain).await {
                    Ok(zone) => {
                        steps.zone_created = true;
                        name_servers = zone.name_servers;
                    }
                    Err(err) => {
                        warn!(domain, %err, "Zone creation failed");
                        last_error = Some(err.to_string());
                    }
                }
            }

            if !steps.nameservers_updated {
                if name_servers.is_empty() {
                    warn!(domain, "No name servers delegated yet; skipping registrar update");
                    last_error = Some("No name servers delegated yet".to_owned());
                } else {
                    match self.whmcs.update_nameservers(&domain, &name_servers).await {
                        Ok(()) => steps.nameservers_updated = true,
                        Err(err) => {
                            warn!(domain, %err, "Name-server update failed");
                            last_error = Some(err.to_string());
                        }
                    }
                }
            }

            if !steps.edge_bound {
                match self.front_door.bind_domain(&domain).await {
                    Ok(binding) => {
                        info!(
                            domain,
                            state = binding.provisioning_state.as_deref().unwrap_or("unknown"),
                            "Edge binding created"
                        );
                        steps.edge_bound = true;
                    }
                    Err(err) => {
                        warn!(domain, %err, "Edge binding failed");
                        last_error = Some(err.to_string());
                    }
                }
            }
        }

        let status = if steps.is_complete() {
            last_error = None;
            RegistrationStatus::Completed
        } else {
            RegistrationStatus::InProgress
        };

        info!(domain, status = status.as_str(), "Provisioning run finished");
        self.repository.record_progress(id, steps, status, name_servers, last_error).await
    }
}
