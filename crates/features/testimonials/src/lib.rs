//! Testimonial feature slice: reader quotes with an admin approval gate.

mod error;
mod handlers;
mod models;
mod repository;

pub use error::{TestimonialsError, TestimonialsErrorExt};
pub use models::{CreateTestimonial, Testimonial, UpdateTestimonial};
pub use repository::TestimonialsRepository;

use ihub_database::{Database, SliceSchema};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "testimonials",
    r"
    DEFINE TABLE OVERWRITE testimonial SCHEMALESS;
    DEFINE INDEX OVERWRITE testimonial_upn ON TABLE testimonial COLUMNS upn;
    ",
);

/// Testimonials feature state.
#[ihub_derive::ihub_slice]
pub struct Testimonials {
    pub repository: TestimonialsRepository,
}

/// Initialize the testimonials feature.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn init(database: &Database) -> Result<InitializedSlice, TestimonialsError> {
    database.apply_schema(&SCHEMA).await?;

    let inner = TestimonialsInner { repository: TestimonialsRepository::new(database.clone()) };
    tracing::info!("Testimonials slice initialized");

    Ok(InitializedSlice::new(Testimonials::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_testimonial, handlers::list_testimonials))
        .routes(routes!(
            handlers::get_testimonial,
            handlers::update_testimonial,
            handlers::delete_testimonial
        ))
        .routes(routes!(handlers::approve_testimonial))
}
