//! Author-profile feature slice: CRUD over pen names, bios, and genres.

mod error;
mod handlers;
mod models;
mod repository;

pub use error::{AuthorsError, AuthorsErrorExt};
pub use models::{Author, CreateAuthor, UpdateAuthor};
pub use repository::AuthorsRepository;

use ihub_database::{Database, SliceSchema};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "authors",
    r"
    DEFINE TABLE OVERWRITE author SCHEMALESS;
    DEFINE INDEX OVERWRITE author_upn ON TABLE author COLUMNS upn;
    ",
);

/// Authors feature state.
#[ihub_derive::ihub_slice]
pub struct Authors {
    pub repository: AuthorsRepository,
}

/// Initialize the authors feature: apply its schema and build the repository.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn init(database: &Database) -> Result<InitializedSlice, AuthorsError> {
    database.apply_schema(&SCHEMA).await?;

    let inner = AuthorsInner { repository: AuthorsRepository::new(database.clone()) };
    tracing::info!("Authors slice initialized");

    Ok(InitializedSlice::new(Authors::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_author, handlers::list_authors))
        .routes(routes!(handlers::get_author, handlers::update_author, handlers::delete_author))
}
