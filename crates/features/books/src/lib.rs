//! Book catalogue feature slice.
//!
//! Stateless fan-out over the Amazon and Penguin Random House catalogues with
//! best-effort merging, plus Wikipedia page summaries.

mod error;
mod handlers;
mod models;
mod service;

pub use error::{BooksError, BooksErrorExt};
pub use models::{Book, BookSearchResults, WikiPage};
pub use service::BooksService;

use ihub_domain::config::GatewayConfig;
use ihub_gateway::{AmazonBooksClient, PrhClient, WikipediaClient, build_client};
use ihub_kernel::domain::registry::InitializedSlice;
use ihub_kernel::server::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Books feature state.
#[ihub_derive::ihub_slice]
pub struct Books {
    pub service: BooksService,
}

/// Initialize the books feature.
///
/// # Errors
/// Returns an error when a gateway client is misconfigured.
pub fn init(gateway: &GatewayConfig) -> Result<InitializedSlice, BooksError> {
    let http = build_client()?;
    let amazon = AmazonBooksClient::new(
        http.clone(),
        &gateway.amazon.url,
        gateway.amazon.partner_tag.clone(),
    )?;
    let penguin =
        PrhClient::new(http.clone(), &gateway.penguin.url, gateway.penguin.api_key.clone())?;
    let wikipedia = WikipediaClient::new(http, &gateway.wikipedia.url)?;

    let inner = BooksInner { service: BooksService::new(amazon, penguin, wikipedia) };
    tracing::info!("Books slice initialized");

    Ok(InitializedSlice::new(Books::new(inner)))
}

/// HTTP routes exposed by this slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::search_books))
        .routes(routes!(handlers::wiki_summary))
}
