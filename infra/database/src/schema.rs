use crate::error::{DatabaseError, DatabaseErrorExt};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tracing::info;

/// Idempotent schema definition contributed by a vertical slice.
///
/// Scripts are expected to use `OVERWRITE` forms (`DEFINE TABLE OVERWRITE`,
/// `DEFINE FIELD OVERWRITE`, `DEFINE INDEX OVERWRITE`) so re-applying them on
/// every startup is safe.
#[derive(Debug, Clone, Copy)]
pub struct SliceSchema {
    pub slice: &'static str,
    pub script: &'static str,
}

impl SliceSchema {
    #[must_use]
    pub const fn new(slice: &'static str, script: &'static str) -> Self {
        Self { slice, script }
    }
}

/// Applies slice schemas against an established session.
#[derive(Debug)]
pub(crate) struct SchemaRunner {
    db: Surreal<Any>,
}

impl SchemaRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn apply(&self, schema: &SliceSchema) -> Result<(), DatabaseError> {
        if schema.script.trim().is_empty() {
            return Err(DatabaseError::Schema {
                message: "Empty schema script".into(),
                context: Some(schema.slice.into()),
            });
        }

        self.db
            .query(schema.script)
            .await
            .context(format!("Applying schema for slice '{}'", schema.slice))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Schema statement rejected for slice '{}'", schema.slice))?;

        info!(slice = schema.slice, "Applied slice schema");
        Ok(())
    }
}
