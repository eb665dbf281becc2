use crate::error::DomainsError;
use crate::models::{DomainRegistration, ProvisioningSteps, RegistrationStatus};
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::DOMAIN_REGISTRATION;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

/// Storage row, kept free of the record id so `CONTENT` writes cannot clash
/// with the record pointer. Status is stored as its string form.
#[derive(Debug, Clone, SurrealValue)]
struct RegistrationRecord {
    upn: String,
    domain: String,
    status: String,
    steps: ProvisioningSteps,
    name_servers: Vec<String>,
    last_error: Option<String>,
    created_at: String,
    updated_at: String,
}

/// Row shape returned by `SELECT *, id.id() AS id`.
#[derive(Debug, SurrealValue)]
struct RegistrationRow {
    id: String,
    upn: String,
    domain: String,
    status: String,
    steps: ProvisioningSteps,
    name_servers: Vec<String>,
    last_error: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<RegistrationRow> for DomainRegistration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            id: row.id,
            upn: row.upn,
            domain: row.domain,
            status: RegistrationStatus::from_stored(&row.status),
            steps: row.steps,
            name_servers: row.name_servers,
            last_error: row.last_error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone)]
pub struct DomainsRepository {
    db: Database,
}

impl DomainsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a new registration in the pending state.
    ///
    /// # Errors
    /// Returns [`DomainsError::Conflict`] when the domain already has a
    /// registration, [`DomainsError::Database`] on storage failures.
    pub async fn create(
        &self,
        upn: &str,
        domain: &str,
    ) -> Result<DomainRegistration, DomainsError> {
        if self.find_by_domain(domain).await?.is_some() {
            return Err(DomainsError::Conflict {
                message: format!("Domain '{domain}' is already registered").into(),
                context: None,
            });
        }

        let id = safe_nanoid!();
        let timestamp = now();
        let record = RegistrationRecord {
            upn: upn.to_owned(),
            domain: domain.to_owned(),
            status: RegistrationStatus::Pending.as_str().to_owned(),
            steps: ProvisioningSteps::default(),
            name_servers: Vec::new(),
            last_error: None,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };

        self.db
            .query(format!("CREATE type::record('{DOMAIN_REGISTRATION}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| DomainsError::Internal {
            message: "Created registration vanished".into(),
            context: Some(id.into()),
        })
    }

    /// All registrations, newest first. Admin-only path.
    pub async fn list_all(&self) -> Result<Vec<DomainRegistration>, DomainsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {DOMAIN_REGISTRATION} ORDER BY created_at DESC"
            ))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<RegistrationRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(DomainRegistration::from).collect())
    }

    /// Registrations owned by `upn`, newest first.
    pub async fn list_for(&self, upn: &str) -> Result<Vec<DomainRegistration>, DomainsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {DOMAIN_REGISTRATION} WHERE upn = $upn \
                 ORDER BY created_at DESC"
            ))
            .bind(("upn", upn.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<RegistrationRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(DomainRegistration::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<DomainRegistration>, DomainsError> {
        let row = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM ONLY type::record('{DOMAIN_REGISTRATION}', $id)"
            ))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<RegistrationRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(DomainRegistration::from))
    }

    pub async fn find_by_domain(
        &self,
        domain: &str,
    ) -> Result<Option<DomainRegistration>, DomainsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {DOMAIN_REGISTRATION} WHERE domain = $domain LIMIT 1"
            ))
            .bind(("domain", domain.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<RegistrationRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().next().map(DomainRegistration::from))
    }

    /// Persists the outcome of one provisioning run.
    pub async fn record_progress(
        &self,
        id: &str,
        steps: ProvisioningSteps,
        status: RegistrationStatus,
        name_servers: Vec<String>,
        last_error: Option<String>,
    ) -> Result<DomainRegistration, DomainsError> {
        self.db
            .query(format!(
                "UPDATE type::record('{DOMAIN_REGISTRATION}', $id) SET \
                 steps = $steps, status = $status, name_servers = $name_servers, \
                 last_error = $last_error, updated_at = $updated_at"
            ))
            .bind(("id", id.to_owned()))
            .bind(("steps", steps))
            .bind(("status", status.as_str().to_owned()))
            .bind(("name_servers", name_servers))
            .bind(("last_error", last_error))
            .bind(("updated_at", now()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(id).await?.ok_or_else(|| DomainsError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainsError> {
        self.db
            .query(format!("DELETE type::record('{DOMAIN_REGISTRATION}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
