use crate::error::AuthorsError;
use crate::models::{Author, CreateAuthor, UpdateAuthor};
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::AUTHOR;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

/// Storage row, kept free of the record id so `CONTENT` writes cannot clash
/// with the record pointer.
#[derive(Debug, Clone, SurrealValue)]
struct AuthorRecord {
    upn: String,
    pen_name: String,
    bio: Option<String>,
    website: Option<String>,
    genres: Vec<String>,
    created_at: String,
    updated_at: String,
}

/// Row shape returned by `SELECT *, id.id() AS id`.
#[derive(Debug, SurrealValue)]
struct AuthorRow {
    id: String,
    upn: String,
    pen_name: String,
    bio: Option<String>,
    website: Option<String>,
    genres: Vec<String>,
    created_at: String,
    updated_at: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            upn: row.upn,
            pen_name: row.pen_name,
            bio: row.bio,
            website: row.website,
            genres: row.genres,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone)]
pub struct AuthorsRepository {
    db: Database,
}

impl AuthorsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Creates an author profile owned by `upn`.
    ///
    /// # Errors
    /// Returns [`AuthorsError::Database`] on storage failures.
    pub async fn create(
        &self,
        upn: &str,
        payload: CreateAuthor,
    ) -> Result<Author, AuthorsError> {
        let id = safe_nanoid!();
        let timestamp = now();
        let record = AuthorRecord {
            upn: upn.to_owned(),
            pen_name: payload.pen_name,
            bio: payload.bio,
            website: payload.website,
            genres: payload.genres,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        };

        self.db
            .query(format!("CREATE type::record('{AUTHOR}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| AuthorsError::Internal {
            message: "Created author vanished".into(),
            context: Some(id.into()),
        })
    }

    /// All profiles, newest first. Admin-only path.
    pub async fn list_all(&self) -> Result<Vec<Author>, AuthorsError> {
        let rows = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM {AUTHOR} ORDER BY created_at DESC"))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<AuthorRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    /// Profiles owned by `upn`, newest first.
    pub async fn list_for(&self, upn: &str) -> Result<Vec<Author>, AuthorsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {AUTHOR} WHERE upn = $upn ORDER BY created_at DESC"
            ))
            .bind(("upn", upn.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<AuthorRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Author>, AuthorsError> {
        let row = self
            .db
            .query(format!("SELECT *, id.id() AS id FROM ONLY type::record('{AUTHOR}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<AuthorRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(Author::from))
    }

    /// Applies a partial update. The caller has already checked ownership.
    pub async fn update(&self, id: &str, patch: UpdateAuthor) -> Result<Author, AuthorsError> {
        let mut sets = vec!["updated_at = $updated_at"];
        if patch.pen_name.is_some() {
            sets.push("pen_name = $pen_name");
        }
        if patch.bio.is_some() {
            sets.push("bio = $bio");
        }
        if patch.website.is_some() {
            sets.push("website = $website");
        }
        if patch.genres.is_some() {
            sets.push("genres = $genres");
        }

        let statement =
            format!("UPDATE type::record('{AUTHOR}', $id) SET {}", sets.join(", "));
        let mut query = self
            .db
            .query(statement)
            .bind(("id", id.to_owned()))
            .bind(("updated_at", now()));
        if let Some(pen_name) = patch.pen_name {
            query = query.bind(("pen_name", pen_name));
        }
        if let Some(bio) = patch.bio {
            query = query.bind(("bio", bio));
        }
        if let Some(website) = patch.website {
            query = query.bind(("website", website));
        }
        if let Some(genres) = patch.genres {
            query = query.bind(("genres", genres));
        }

        query
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(id).await?.ok_or_else(|| AuthorsError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), AuthorsError> {
        self.db
            .query(format!("DELETE type::record('{AUTHOR}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
