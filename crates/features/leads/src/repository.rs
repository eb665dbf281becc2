use crate::error::LeadsError;
use crate::models::{CaptureLead, Lead};
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::LEAD;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

#[derive(Debug, Clone, SurrealValue)]
struct LeadRecord {
    email: String,
    name: Option<String>,
    source: Option<String>,
    created_at: String,
}

#[derive(Debug, SurrealValue)]
struct LeadRow {
    id: String,
    email: String,
    name: Option<String>,
    source: Option<String>,
    created_at: String,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            source: row.source,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeadsRepository {
    db: Database,
}

impl LeadsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, payload: CaptureLead) -> Result<Lead, LeadsError> {
        let id = safe_nanoid!();
        let record = LeadRecord {
            email: payload.email,
            name: payload.name,
            source: payload.source,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.db
            .query(format!("CREATE type::record('{LEAD}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| LeadsError::Internal {
            message: "Created lead vanished".into(),
            context: Some(id.into()),
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Lead>, LeadsError> {
        let rows = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM {LEAD} ORDER BY created_at DESC"))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<LeadRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Lead>, LeadsError> {
        let row = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM ONLY type::record('{LEAD}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<LeadRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(Lead::from))
    }

    pub async fn delete(&self, id: &str) -> Result<(), LeadsError> {
        self.db
            .query(format!("DELETE type::record('{LEAD}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
