//! Facade crate for `InkHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to register every feature slice against a database and
//!   change feed; extend as new slices appear.
//! - Collect the HTTP surface with the per-feature `router()` functions.

use ihub_database::Database;
pub use ihub_domain as domain;
use ihub_domain::config::ApiConfig;
use ihub_feed::ChangeFeed;
pub use ihub_kernel as kernel;

pub mod server {
    pub mod router {
        pub use ihub_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use ihub_authors as authors;
    pub use ihub_billing as billing;
    pub use ihub_books as books;
    pub use ihub_domains as domains;
    pub use ihub_experiments as experiments;
    pub use ihub_leads as leads;
    pub use ihub_referrals as referrals;
    pub use ihub_testimonials as testimonials;

    /// Features compiled into this build.
    pub const ENABLED: &[&str] = &[
        "authors",
        "testimonials",
        "leads",
        "referrals",
        "experiments",
        "domains",
        "books",
        "billing",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all features.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub async fn init(
    config: &ApiConfig,
    database: &Database,
    feed: &ChangeFeed,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let mut slices = Vec::new();

    // Record-backed slices
    slices.push(features::authors::init(database).await?);
    slices.push(features::testimonials::init(database).await?);
    slices.push(features::leads::init(database).await?);
    slices.push(features::referrals::init(database).await?);
    slices.push(features::experiments::init(database).await?);

    // Domains also attach the provisioning trigger to the change feed
    slices.push(features::domains::init(database, feed, &config.gateway).await?);

    // Gateway-only slices
    slices.push(features::books::init(&config.gateway)?);
    slices.push(features::billing::init(&config.gateway.stripe)?);

    Ok(slices)
}
