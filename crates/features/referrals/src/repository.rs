use crate::error::ReferralsError;
use crate::models::Referral;
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::REFERRAL;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

#[derive(Debug, Clone, SurrealValue)]
struct ReferralRecord {
    upn: String,
    code: String,
    claims: u32,
    created_at: String,
}

#[derive(Debug, SurrealValue)]
struct ReferralRow {
    id: String,
    upn: String,
    code: String,
    claims: u32,
    created_at: String,
}

impl From<ReferralRow> for Referral {
    fn from(row: ReferralRow) -> Self {
        Self {
            id: row.id,
            upn: row.upn,
            code: row.code,
            claims: row.claims,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReferralsRepository {
    db: Database,
}

impl ReferralsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Mints a fresh referral code for `upn`.
    pub async fn create(&self, upn: &str) -> Result<Referral, ReferralsError> {
        let id = safe_nanoid!();
        let record = ReferralRecord {
            upn: upn.to_owned(),
            // short enough to share aloud, long enough not to collide
            code: safe_nanoid!(8),
            claims: 0,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.db
            .query(format!("CREATE type::record('{REFERRAL}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| ReferralsError::Internal {
            message: "Created referral vanished".into(),
            context: Some(id.into()),
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Referral>, ReferralsError> {
        let rows = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM {REFERRAL} ORDER BY created_at DESC"))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<ReferralRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Referral::from).collect())
    }

    pub async fn list_for(&self, upn: &str) -> Result<Vec<Referral>, ReferralsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {REFERRAL} WHERE upn = $upn ORDER BY created_at DESC"
            ))
            .bind(("upn", upn.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<ReferralRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Referral::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Referral>, ReferralsError> {
        let row = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM ONLY type::record('{REFERRAL}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<ReferralRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(Referral::from))
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Referral>, ReferralsError> {
        let row = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {REFERRAL} WHERE code = $code LIMIT 1"
            ))
            .bind(("code", code.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<ReferralRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.into_iter().next().map(Referral::from))
    }

    /// Records a successful claim against a code.
    ///
    /// # Errors
    /// [`ReferralsError::NotFound`] for an unknown code, and
    /// [`ReferralsError::Conflict`] when the owner tries to claim their own.
    pub async fn claim(&self, code: &str, claimer_upn: &str) -> Result<Referral, ReferralsError> {
        let referral = self.find_by_code(code).await?.ok_or_else(|| ReferralsError::NotFound {
            message: format!("Referral code '{code}'").into(),
            context: None,
        })?;

        if referral.upn == claimer_upn {
            return Err(ReferralsError::Conflict {
                message: "Cannot claim your own referral code".into(),
                context: None,
            });
        }

        self.db
            .query(format!("UPDATE type::record('{REFERRAL}', $id) SET claims += 1"))
            .bind(("id", referral.id.clone()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&referral.id).await?.ok_or_else(|| ReferralsError::Internal {
            message: "Claimed referral vanished".into(),
            context: Some(referral.id.into()),
        })
    }
}
