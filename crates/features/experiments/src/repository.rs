use crate::error::ExperimentsError;
use crate::models::{CreateExperiment, Experiment, UpdateExperiment};
use chrono::{SecondsFormat, Utc};
use ihub_database::{Database, DatabaseError};
use ihub_domain::constants::EXPERIMENT;
use ihub_kernel::safe_nanoid;
use surrealdb_types::SurrealValue;

#[derive(Debug, Clone, SurrealValue)]
struct ExperimentRecord {
    name: String,
    description: Option<String>,
    variants: Vec<String>,
    active: bool,
    created_at: String,
}

#[derive(Debug, SurrealValue)]
struct ExperimentRow {
    id: String,
    name: String,
    description: Option<String>,
    variants: Vec<String>,
    active: bool,
    created_at: String,
}

impl From<ExperimentRow> for Experiment {
    fn from(row: ExperimentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            variants: row.variants,
            active: row.active,
            created_at: row.created_at,
        }
    }
}

/// Deterministically assigns `key` to one of `variants`.
///
/// Hashing the experiment name alongside the key decorrelates assignments
/// across experiments, so one heavy-rolling visitor does not always land in
/// the first bucket.
#[must_use]
pub fn assign_variant<'a>(experiment: &str, key: &str, variants: &'a [String]) -> Option<&'a str> {
    if variants.is_empty() {
        return None;
    }
    let hash = fxhash::hash64(&format!("{experiment}:{key}"));
    let index = usize::try_from(hash % variants.len() as u64).unwrap_or(0);
    variants.get(index).map(String::as_str)
}

#[derive(Debug, Clone)]
pub struct ExperimentsRepository {
    db: Database,
}

impl ExperimentsRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, payload: CreateExperiment) -> Result<Experiment, ExperimentsError> {
        if self.find_by_name(&payload.name).await?.is_some() {
            return Err(ExperimentsError::Conflict {
                message: format!("Experiment '{}' already exists", payload.name).into(),
                context: None,
            });
        }

        let id = safe_nanoid!();
        let record = ExperimentRecord {
            name: payload.name,
            description: payload.description,
            variants: payload.variants,
            active: payload.active,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        self.db
            .query(format!("CREATE type::record('{EXPERIMENT}', $id) CONTENT $record"))
            .bind(("id", id.clone()))
            .bind(("record", record))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(&id).await?.ok_or_else(|| ExperimentsError::Internal {
            message: "Created experiment vanished".into(),
            context: Some(id.into()),
        })
    }

    pub async fn list_all(&self) -> Result<Vec<Experiment>, ExperimentsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {EXPERIMENT} ORDER BY created_at DESC"
            ))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<ExperimentRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().map(Experiment::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Option<Experiment>, ExperimentsError> {
        let row = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM ONLY type::record('{EXPERIMENT}', $id)"
            ))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Option<ExperimentRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(row.map(Experiment::from))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Experiment>, ExperimentsError> {
        let rows = self
            .db
            .query(format!(
                "SELECT *, id.id() AS id FROM {EXPERIMENT} WHERE name = $name LIMIT 1"
            ))
            .bind(("name", name.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .take::<Vec<ExperimentRow>>(0)
            .map_err(DatabaseError::from)?;
        Ok(rows.into_iter().next().map(Experiment::from))
    }

    pub async fn update(
        &self,
        id: &str,
        patch: UpdateExperiment,
    ) -> Result<Experiment, ExperimentsError> {
        let mut sets = Vec::new();
        if patch.description.is_some() {
            sets.push("description = $description");
        }
        if patch.variants.is_some() {
            sets.push("variants = $variants");
        }
        if patch.active.is_some() {
            sets.push("active = $active");
        }
        if sets.is_empty() {
            return self.get(id).await?.ok_or_else(|| ExperimentsError::NotFound {
                message: id.to_owned().into(),
                context: None,
            });
        }

        let statement =
            format!("UPDATE type::record('{EXPERIMENT}', $id) SET {}", sets.join(", "));
        let mut query = self.db.query(statement).bind(("id", id.to_owned()));
        if let Some(description) = patch.description {
            query = query.bind(("description", description));
        }
        if let Some(variants) = patch.variants {
            query = query.bind(("variants", variants));
        }
        if let Some(active) = patch.active {
            query = query.bind(("active", active));
        }

        query
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;

        self.get(id).await?.ok_or_else(|| ExperimentsError::NotFound {
            message: id.to_owned().into(),
            context: None,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ExperimentsError> {
        self.db
            .query(format!("DELETE type::record('{EXPERIMENT}', $id)"))
            .bind(("id", id.to_owned()))
            .await
            .map_err(DatabaseError::from)?
            .check()
            .map_err(surrealdb::Error::from)
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::assign_variant;

    fn variants() -> Vec<String> {
        vec!["control".to_owned(), "treatment".to_owned(), "wildcard".to_owned()]
    }

    #[test]
    fn assignment_is_deterministic() {
        let v = variants();
        let first = assign_variant("cover-test", "visitor-1", &v).unwrap();
        for _ in 0..10 {
            assert_eq!(assign_variant("cover-test", "visitor-1", &v).unwrap(), first);
        }
    }

    #[test]
    fn assignment_depends_on_experiment_name() {
        let v = variants();
        let assignments: Vec<_> = (0..64)
            .map(|i| {
                let key = format!("visitor-{i}");
                (
                    assign_variant("exp-a", &key, &v).unwrap().to_owned(),
                    assign_variant("exp-b", &key, &v).unwrap().to_owned(),
                )
            })
            .collect();
        // over 64 visitors at least one should land differently between experiments
        assert!(assignments.iter().any(|(a, b)| a != b));
    }

    #[test]
    fn empty_variant_list_yields_none() {
        assert!(assign_variant("x", "visitor", &[]).is_none());
    }
}
