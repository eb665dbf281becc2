use crate::Leads;
use crate::models::{CaptureLead, Lead, is_valid_email};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_domain::constants::TAG_LEADS;
use ihub_kernel::prelude::*;

/// Unauthenticated: landing pages post here directly.
#[api_handler(
    post,
    path = "/api/leads",
    request_body = CaptureLead,
    responses((status = CREATED, description = "Lead captured", body = Lead)),
    tag = TAG_LEADS,
)]
pub(super) async fn capture_lead(
    State(state): State<ApiState>,
    Json(payload): Json<CaptureLead>,
) -> Result<(StatusCode, Json<Lead>), ApiError> {
    if !is_valid_email(&payload.email) {
        return Err(ApiError::validation("email is malformed"));
    }

    let slice = state.try_get_slice::<Leads>()?;
    let lead = slice.repository.create(payload).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[api_handler(
    get,
    path = "/api/leads",
    responses((status = OK, description = "All captured leads", body = [Lead])),
    tag = TAG_LEADS,
)]
pub(super) async fn list_leads(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<Vec<Lead>>, ApiError> {
    let slice = state.try_get_slice::<Leads>()?;
    Ok(Json(slice.repository.list_all().await?))
}

#[api_handler(
    delete,
    path = "/api/leads/{id}",
    params(("id" = String, Path, description = "Lead ID")),
    responses((status = NO_CONTENT, description = "Lead deleted")),
    tag = TAG_LEADS,
)]
pub(super) async fn delete_lead(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ResourceGuard::verify(&id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Leads>()?;
    slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Lead '{id}'")))?;
    slice.repository.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
