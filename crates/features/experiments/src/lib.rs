//! Experiment feature slice: named A/B tests with deterministic bucketing.

mod error;
mod handlers;
mod models;
mod repository;

pub use error::{ExperimentsError, ExperimentsErrorExt};
pub use models::{CreateExperiment, Experiment, UpdateExperiment, VariantAssignment};
pub use repository::{ExperimentsRepository, assign_variant};

use ihub_database::{Database, SliceSchema};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "experiments",
    r"
    DEFINE TABLE OVERWRITE experiment SCHEMALESS;
    DEFINE INDEX OVERWRITE experiment_name ON TABLE experiment COLUMNS name UNIQUE;
    ",
);

/// Experiments feature state.
#[ihub_derive::ihub_slice]
pub struct Experiments {
    pub repository: ExperimentsRepository,
}

/// Initialize the experiments feature.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn init(database: &Database) -> Result<InitializedSlice, ExperimentsError> {
    database.apply_schema(&SCHEMA).await?;

    let inner = ExperimentsInner { repository: ExperimentsRepository::new(database.clone()) };
    tracing::info!("Experiments slice initialized");

    Ok(InitializedSlice::new(Experiments::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_experiment, handlers::list_experiments))
        .routes(routes!(
            handlers::get_experiment,
            handlers::update_experiment,
            handlers::delete_experiment
        ))
        .routes(routes!(handlers::get_variant))
}
