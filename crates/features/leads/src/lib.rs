//! Lead-capture feature slice: unauthenticated intake, admin-only review.

mod error;
mod handlers;
mod models;
mod repository;

pub use error::{LeadsError, LeadsErrorExt};
pub use models::{CaptureLead, Lead, is_valid_email};
pub use repository::LeadsRepository;

use ihub_database::{Database, SliceSchema};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "leads",
    r"
    DEFINE TABLE OVERWRITE lead SCHEMALESS;
    DEFINE INDEX OVERWRITE lead_email ON TABLE lead COLUMNS email;
    ",
);

/// Leads feature state.
#[ihub_derive::ihub_slice]
pub struct Leads {
    pub repository: LeadsRepository,
}

/// Initialize the leads feature.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn init(database: &Database) -> Result<InitializedSlice, LeadsError> {
    database.apply_schema(&SCHEMA).await?;

    let inner = LeadsInner { repository: LeadsRepository::new(database.clone()) };
    tracing::info!("Leads slice initialized");

    Ok(InitializedSlice::new(Leads::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::capture_lead, handlers::list_leads))
        .routes(routes!(handlers::delete_lead))
}
