//! Referral feature slice: shareable codes with claim counting.

mod error;
mod handlers;
mod models;
mod repository;

pub use error::{ReferralsError, ReferralsErrorExt};
pub use models::{ClaimReferral, Referral};
pub use repository::ReferralsRepository;

use ihub_database::{Database, SliceSchema};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

const SCHEMA: SliceSchema = SliceSchema::new(
    "referrals",
    r"
    DEFINE TABLE OVERWRITE referral SCHEMALESS;
    DEFINE INDEX OVERWRITE referral_upn ON TABLE referral COLUMNS upn;
    DEFINE INDEX OVERWRITE referral_code ON TABLE referral COLUMNS code UNIQUE;
    ",
);

/// Referrals feature state.
#[ihub_derive::ihub_slice]
pub struct Referrals {
    pub repository: ReferralsRepository,
}

/// Initialize the referrals feature.
///
/// # Errors
/// Returns an error if the schema cannot be applied.
pub async fn init(database: &Database) -> Result<InitializedSlice, ReferralsError> {
    database.apply_schema(&SCHEMA).await?;

    let inner = ReferralsInner { repository: ReferralsRepository::new(database.clone()) };
    tracing::info!("Referrals slice initialized");

    Ok(InitializedSlice::new(Referrals::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::create_referral, handlers::list_referrals))
        .routes(routes!(handlers::claim_referral))
}
