use crate::error::TestimonialsError;
use crate::models::{CreateTestimonial, Testimonial, UpdateTestimonial};
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::TESTIMONIAL;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

#[derive(Debug, Clone, SurrealValue)]
struct TestimonialRecord {
    upn: String,
    author_name: String,
    quote: String,
    source: Option<String>,
    approved: bool,
    created_at: String,
}

#[derive(Debug, SurrealValue)]
struct TestimonialRow {
    id: String,
    upn: String,
    author_name: String,
    quote: String,
    source: Option<String>,
    approved: bool,
    created_at: String,
}

impl From<TestimonialRow> for Testimonial {
    fn from(row: TestimonialRow) -> Self {
        Self {
            id: row.id,
            upn: row.upn,
            author_name: row.author_name,
            quote: row.quote,
            source: row.source,
            approved: row.approved,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestimonialsRepository {
    db: Database,
}

impl TestimonialsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a new, unapproved testimonial owned by `upn`.
    pub async fn create(
        &self,
        upn: &str,
        payload: CreateTestimonial,
    ) -> Result<Testimonial, TestimonialsError> {
        let id = safe_nanoid!();
        let record = TestimonialRecord {
            upn: upn.to_owned(),
            author_name: payload.author_name,
            quote: payload.quote,
            source: payload.source,
            approved: false,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.db
            .query(format!("CREATE type::record('{TESTIMONIAL}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| TestimonialsError::Internal {
            message: "Created testimonial vanished".into(),
            context: Some(id.into()),
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Testimonial>, TestimonialsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {TESTIMONIAL} ORDER BY created_at DESC"
            ))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<TestimonialRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    pub async fn list_for(&self, upn: &str) -> Result<Vec<Testimonial>, TestimonialsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {TESTIMONIAL} WHERE upn = $upn ORDER BY created_at DESC"
            ))
            .bind(("upn", upn.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<TestimonialRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Testimonial::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Testimonial>, TestimonialsError> {
        let row = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM ONLY type::record('{TESTIMONIAL}', $id)"
            ))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<TestimonialRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(Testimonial::from))
    }

    pub async fn update(
        &self,
        id: &str,
        patch: UpdateTestimonial,
    ) -> Result<Testimonial, TestimonialsError> {
        let mut sets = Vec::new();
        if patch.author_name.is_some() {
            sets.push("author_name = $author_name");
        }
        if patch.quote.is_some() {
            sets.push("quote = $quote");
        }
        if patch.source.is_some() {
            sets.push("source = $source");
        }
        if sets.is_empty() {
            return self.get(id).await?.ok_or_else(|| TestimonialsError::NotFound {
                message: id.to_owned().into(),
                context: None,
            });
        }

        let statement =
            format!("UPDATE type::record('{TESTIMONIAL}', $id) SET {}", sets.join(", "));
        let mut query = self.db.query(statement).bind(("id", id.to_owned()));
        if let Some(author_name) = patch.author_name {
            query = query.bind(("author_name", author_name));
        }
        if let Some(quote) = patch.quote {
            query = query.bind(("quote", quote));
        }
        if let Some(source) = patch.source {
            query = query.bind(("source", source));
        }

        query
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(id).await?.ok_or_else(|| TestimonialsError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    /// Marks a testimonial approved. Admin-only at the handler layer.
    pub async fn approve(&self, id: &str) -> Result<Testimonial, TestimonialsError> {
        self.db
            .query(format!("UPDATE type::record('{TESTIMONIAL}', $id) SET approved = true"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(id).await?.ok_or_else(|| TestimonialsError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), TestimonialsError> {
        self.db
            .query(format!("DELETE type::record('{TESTIMONIAL}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
