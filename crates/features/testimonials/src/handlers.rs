use crate::Testimonials;
use crate::models::{CreateTestimonial, Testimonial, UpdateTestimonial};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_domain::constants::TAG_TESTIMONIALS;
use ihub_kernel::prelude::*;

async fn visible_testimonial(
    state: &ApiState,
    claims: &Claims,
    id: &str,
) -> Result<Testimonial, ApiError> {
    let id = ResourceGuard::verify(id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Testimonials>()?;
    let testimonial = slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Testimonial '{id}'")))?;
    if !claims.owns(&testimonial.upn) {
        return Err(ApiError::not_found(format!("Testimonial '{id}'")));
    }
    Ok(testimonial)
}

#[api_handler(
    post,
    path = "/api/testimonials",
    request_body = CreateTestimonial,
    responses((status = CREATED, description = "Testimonial submitted", body = Testimonial)),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn create_testimonial(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), ApiError> {
    if payload.quote.trim().is_empty() {
        return Err(ApiError::validation("quote must not be empty"));
    }
    if payload.author_name.trim().is_empty() {
        return Err(ApiError::validation("authorName must not be empty"));
    }

    let slice = state.try_get_slice::<Testimonials>()?;
    let testimonial = slice.repository.create(&claims.upn, payload).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[api_handler(
    get,
    path = "/api/testimonials",
    responses((status = OK, description = "Testimonials visible to the caller", body = [Testimonial])),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn list_testimonials(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    let slice = state.try_get_slice::<Testimonials>()?;
    let testimonials = if claims.is_admin() {
        slice.repository.list_all().await?
    } else {
        slice.repository.list_for(&claims.upn).await?
    };
    Ok(Json(testimonials))
}

#[api_handler(
    get,
    path = "/api/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses((status = OK, description = "Testimonial", body = Testimonial)),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn get_testimonial(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>, ApiError> {
    Ok(Json(visible_testimonial(&state, &claims, &id).await?))
}

#[api_handler(
    put,
    path = "/api/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonial,
    responses((status = OK, description = "Updated testimonial", body = Testimonial)),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn update_testimonial(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTestimonial>,
) -> Result<Json<Testimonial>, ApiError> {
    if payload.quote.as_deref().is_some_and(|quote| quote.trim().is_empty()) {
        return Err(ApiError::validation("quote must not be empty"));
    }

    let testimonial = visible_testimonial(&state, &claims, &id).await?;
    let slice = state.try_get_slice::<Testimonials>()?;
    let updated = slice.repository.update(&testimonial.id, payload).await?;
    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses((status = NO_CONTENT, description = "Testimonial deleted")),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn delete_testimonial(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let testimonial = visible_testimonial(&state, &claims, &id).await?;
    let slice = state.try_get_slice::<Testimonials>()?;
    slice.repository.delete(&testimonial.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[api_handler(
    post,
    path = "/api/testimonials/{id}/approve",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses((status = OK, description = "Approved testimonial", body = Testimonial)),
    tag = TAG_TESTIMONIALS,
)]
pub(super) async fn approve_testimonial(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Testimonial>, ApiError> {
    let id = ResourceGuard::verify(&id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Testimonials>()?;
    let existing = slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Testimonial '{id}'")))?;
    if existing.approved {
        return Err(ApiError::conflict("Testimonial is already approved"));
    }

    let approved = slice.repository.approve(&id).await?;
    Ok(Json(approved))
}
