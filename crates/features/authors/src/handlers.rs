use crate::Authors;
use crate::models::{Author, CreateAuthor, UpdateAuthor};
use axum::Json;
use axum::extract::{Path, State};
use ihub_derive::api_handler;
use ihub_domain::constants::TAG_AUTHORS;
use ihub_kernel::prelude::*;

/// Loads an author visible to the caller, hiding foreign records behind 404.
async fn visible_author(
    state: &ApiState,
    claims: &Claims,
    id: &str,
) -> Result<Author, ApiError> {
    let id = ResourceGuard::verify(id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Authors>()?;
    let author = slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Author '{id}'")))?;
    if !claims.owns(&author.upn) {
        return Err(ApiError::not_found(format!("Author '{id}'")));
    }
    Ok(author)
}

#[api_handler(
    post,
    path = "/api/authors",
    request_body = CreateAuthor,
    responses((status = CREATED, description = "Author profile created", body = Author)),
    tag = TAG_AUTHORS,
)]
pub(super) async fn create_author(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateAuthor>,
) -> Result<(axum::http::StatusCode, Json<Author>), ApiError> {
    if payload.pen_name.trim().is_empty() {
        return Err(ApiError::validation("penName must not be empty"));
    }

    let slice = state.try_get_slice::<Authors>()?;
    let author = slice.repository.create(&claims.upn, payload).await?;
    Ok((axum::http::StatusCode::CREATED, Json(author)))
}

#[api_handler(
    get,
    path = "/api/authors",
    responses((status = OK, description = "Author profiles visible to the caller", body = [Author])),
    tag = TAG_AUTHORS,
)]
pub(super) async fn list_authors(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Author>>, ApiError> {
    let slice = state.try_get_slice::<Authors>()?;
    let authors = if claims.is_admin() {
        slice.repository.list_all().await?
    } else {
        slice.repository.list_for(&claims.upn).await?
    };
    Ok(Json(authors))
}

#[api_handler(
    get,
    path = "/api/authors/{id}",
    params(("id" = String, Path, description = "Author ID")),
    responses((status = OK, description = "Author profile", body = Author)),
    tag = TAG_AUTHORS,
)]
pub(super) async fn get_author(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Author>, ApiError> {
    Ok(Json(visible_author(&state, &claims, &id).await?))
}

#[api_handler(
    put,
    path = "/api/authors/{id}",
    params(("id" = String, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses((status = OK, description = "Updated author profile", body = Author)),
    tag = TAG_AUTHORS,
)]
pub(super) async fn update_author(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAuthor>,
) -> Result<Json<Author>, ApiError> {
    if payload.pen_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(ApiError::validation("penName must not be empty"));
    }

    let author = visible_author(&state, &claims, &id).await?;
    let slice = state.try_get_slice::<Authors>()?;
    let updated = slice.repository.update(&author.id, payload).await?;
    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/authors/{id}",
    params(("id" = String, Path, description = "Author ID")),
    responses((status = NO_CONTENT, description = "Author profile deleted")),
    tag = TAG_AUTHORS,
)]
pub(super) async fn delete_author(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<axum::http::StatusCode, ApiError> {
    let author = visible_author(&state, &claims, &id).await?;
    let slice = state.try_get_slice::<Authors>()?;
    slice.repository.delete(&author.id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
