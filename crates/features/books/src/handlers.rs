use crate::Books;
use crate::models::{BookSearchResults, WikiPage};
use axum::Json;
use axum::extract::{Path, Query, State};
use ihub_derive::api_handler;
use ihub_derive::api_model;
use ihub_domain::constants::TAG_BOOKS;
use ihub_kernel::prelude::*;

#[api_model]
pub(super) struct SearchQuery {
    pub q: String,
}

#[api_handler(
    get,
    path = "/api/books/search",
    params(("q" = String, Query, description = "Search keywords")),
    responses((status = OK, description = "Merged catalogue results", body = BookSearchResults)),
    tag = TAG_BOOKS,
)]
pub(super) async fn search_books(
    State(state): State<ApiState>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<BookSearchResults>, ApiError> {
    let keywords = query.q.trim();
    if keywords.is_empty() {
        return Err(ApiError::validation("q must not be empty"));
    }

    let slice = state.try_get_slice::<Books>()?;
    Ok(Json(slice.service.search(keywords).await?))
}

#[api_handler(
    get,
    path = "/api/books/wiki/{title}",
    params(("title" = String, Path, description = "Wikipedia page title")),
    responses((status = OK, description = "Page summary", body = WikiPage)),
    tag = TAG_BOOKS,
)]
pub(super) async fn wiki_summary(
    State(state): State<ApiState>,
    AuthUser(_claims): AuthUser,
    Path(title): Path<String>,
) -> Result<Json<WikiPage>, ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::validation("title must not be empty"));
    }

    let slice = state.try_get_slice::<Books>()?;
    Ok(Json(slice.service.wiki_summary(&title).await?))
}
