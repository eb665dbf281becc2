use crate::Experiments;
use crate::models::{CreateExperiment, Experiment, UpdateExperiment, VariantAssignment};
use crate::repository::assign_variant;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_derive::api_model;
use ihub_domain::constants::TAG_EXPERIMENTS;
use ihub_kernel::prelude::*;

#[api_handler(
    post,
    path = "/api/experiments",
    request_body = CreateExperiment,
    responses((status = CREATED, description = "Experiment defined", body = Experiment)),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn create_experiment(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Json(payload): Json<CreateExperiment>,
) -> Result<(StatusCode, Json<Experiment>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }
    if payload.variants.len() < 2 {
        return Err(ApiError::validation("an experiment needs at least two variants"));
    }

    let slice = state.try_get_slice::<Experiments>()?;
    let experiment = slice.repository.create(payload).await?;
    Ok((StatusCode::CREATED, Json(experiment)))
}

#[api_handler(
    get,
    path = "/api/experiments",
    responses((status = OK, description = "All experiments", body = [Experiment])),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn list_experiments(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<Vec<Experiment>>, ApiError> {
    let slice = state.try_get_slice::<Experiments>()?;
    Ok(Json(slice.repository.list_all().await?))
}

#[api_handler(
    get,
    path = "/api/experiments/{id}",
    params(("id" = String, Path, description = "Experiment ID")),
    responses((status = OK, description = "Experiment", body = Experiment)),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn get_experiment(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Experiment>, ApiError> {
    let id = ResourceGuard::verify(&id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Experiments>()?;
    let experiment = slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Experiment '{id}'")))?;
    Ok(Json(experiment))
}

#[api_handler(
    put,
    path = "/api/experiments/{id}",
    params(("id" = String, Path, description = "Experiment ID")),
    request_body = UpdateExperiment,
    responses((status = OK, description = "Updated experiment", body = Experiment)),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn update_experiment(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateExperiment>,
) -> Result<Json<Experiment>, ApiError> {
    if payload.variants.as_ref().is_some_and(|v| v.len() < 2) {
        return Err(ApiError::validation("an experiment needs at least two variants"));
    }

    let id = ResourceGuard::verify(&id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Experiments>()?;
    slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Experiment '{id}'")))?;
    let updated = slice.repository.update(&id, payload).await?;
    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/experiments/{id}",
    params(("id" = String, Path, description = "Experiment ID")),
    responses((status = NO_CONTENT, description = "Experiment deleted")),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn delete_experiment(
    State(state): State<ApiState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ResourceGuard::verify(&id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Experiments>()?;
    slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Experiment '{id}'")))?;
    slice.repository.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[api_model]
pub(super) struct VariantQuery {
    /// Anonymous visitor ID; ignored when the caller is authenticated
    pub visitor: Option<String>,
}

#[api_handler(
    get,
    path = "/api/experiments/{name}/variant",
    params(
        ("name" = String, Path, description = "Experiment name"),
        ("visitor" = Option<String>, Query, description = "Anonymous visitor ID"),
    ),
    responses((status = OK, description = "Deterministic variant assignment", body = VariantAssignment)),
    tag = TAG_EXPERIMENTS,
)]
pub(super) async fn get_variant(
    State(state): State<ApiState>,
    user: Option<AuthUser>,
    Path(name): Path<String>,
    Query(query): Query<VariantQuery>,
) -> Result<Json<VariantAssignment>, ApiError> {
    let key = match (&user, &query.visitor) {
        (Some(AuthUser(claims)), _) => claims.upn.clone(),
        (None, Some(visitor)) if !visitor.trim().is_empty() => visitor.clone(),
        _ => return Err(ApiError::validation("visitor is required for anonymous callers")),
    };

    let slice = state.try_get_slice::<Experiments>()?;
    let experiment = slice
        .repository
        .find_by_name(&name)
        .await?
        .filter(|experiment| experiment.active)
        .ok_or_else(|| ApiError::not_found(format!("Experiment '{name}'")))?;

    let variant = assign_variant(&experiment.name, &key, &experiment.variants)
        .ok_or_else(|| ApiError::not_found(format!("Experiment '{name}'")))?;

    Ok(Json(VariantAssignment { experiment: experiment.name.clone(), variant: variant.to_owned() }))
}
