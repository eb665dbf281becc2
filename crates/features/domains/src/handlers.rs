use crate::Domains;
use crate::models::{
    AvailabilityReport, CreateDomainRegistration, DomainRegistration,
    DomainRegistrationRequested, RegistrationStatus, is_valid_domain,
};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_derive::api_model;
use ihub_domain::constants::TAG_DOMAINS;
use ihub_kernel::prelude::*;

/// Loads a registration visible to the caller, hiding foreign records
/// behind 404.
async fn visible_registration(
    state: &ApiState,
    claims: &Claims,
    id: &str,
) -> Result<DomainRegistration, ApiError> {
    let id = ResourceGuard::verify(id).map_err(|e| ApiError::validation(e.to_string()))?;
    let slice = state.try_get_slice::<Domains>()?;
    let registration = slice
        .repository
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Registration '{id}'")))?;
    if !claims.owns(&registration.upn) {
        return Err(ApiError::not_found(format!("Registration '{id}'")));
    }
    Ok(registration)
}

#[api_handler(
    post,
    path = "/api/domains",
    request_body = CreateDomainRegistration,
    responses((status = CREATED, description = "Registration stored, provisioning queued", body = DomainRegistration)),
    tag = TAG_DOMAINS,
)]
pub(super) async fn create_registration(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateDomainRegistration>,
) -> Result<(StatusCode, Json<DomainRegistration>), ApiError> {
    let domain = payload.domain.trim().to_ascii_lowercase();
    if !is_valid_domain(&domain) {
        return Err(ApiError::validation(format!("'{domain}' is not a valid domain name")));
    }

    let slice = state.try_get_slice::<Domains>()?;
    let registration = slice.repository.create(&claims.upn, &domain).await?;

    state
        .feed
        .enqueue(DomainRegistrationRequested { id: registration.id.clone() })
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(registration)))
}

#[api_handler(
    get,
    path = "/api/domains",
    responses((status = OK, description = "Registrations visible to the caller", body = [DomainRegistration])),
    tag = TAG_DOMAINS,
)]
pub(super) async fn list_registrations(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<DomainRegistration>>, ApiError> {
    let slice = state.try_get_slice::<Domains>()?;
    let registrations = if claims.is_admin() {
        slice.repository.list_all().await?
    } else {
        slice.repository.list_for(&claims.upn).await?
    };
    Ok(Json(registrations))
}

#[api_handler(
    get,
    path = "/api/domains/{id}",
    params(("id" = String, Path, description = "Registration ID")),
    responses((status = OK, description = "Registration", body = DomainRegistration)),
    tag = TAG_DOMAINS,
)]
pub(super) async fn get_registration(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DomainRegistration>, ApiError> {
    Ok(Json(visible_registration(&state, &claims, &id).await?))
}

#[api_handler(
    post,
    path = "/api/domains/{id}/complete",
    params(("id" = String, Path, description = "Registration ID")),
    responses((status = ACCEPTED, description = "Provisioning re-queued", body = DomainRegistration)),
    tag = TAG_DOMAINS,
)]
pub(super) async fn complete_registration(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<DomainRegistration>), ApiError> {
    let registration = visible_registration(&state, &claims, &id).await?;
    if registration.status == RegistrationStatus::Completed {
        return Err(ApiError::conflict(format!(
            "Registration for '{}' is already completed",
            registration.domain
        )));
    }

    state
        .feed
        .enqueue(DomainRegistrationRequested { id: registration.id.clone() })
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok((StatusCode::ACCEPTED, Json(registration)))
}

#[api_handler(
    delete,
    path = "/api/domains/{id}",
    params(("id" = String, Path, description = "Registration ID")),
    responses((status = NO_CONTENT, description = "Registration deleted")),
    tag = TAG_DOMAINS,
)]
pub(super) async fn delete_registration(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let registration = visible_registration(&state, &claims, &id).await?;
    if registration.status == RegistrationStatus::Completed {
        return Err(ApiError::conflict(format!(
            "Registration for '{}' is completed and can no longer be deleted",
            registration.domain
        )));
    }

    let slice = state.try_get_slice::<Domains>()?;
    slice.repository.delete(&registration.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[api_model]
pub(super) struct AvailabilityQuery {
    pub domain: String,
}

#[api_handler(
    get,
    path = "/api/domains/available",
    params(("domain" = String, Query, description = "Domain name to look up")),
    responses((status = OK, description = "Availability report", body = AvailabilityReport)),
    tag = TAG_DOMAINS,
)]
pub(super) async fn check_availability(
    State(state): State<ApiState>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityReport>, ApiError> {
    let domain = query.domain.trim().to_ascii_lowercase();
    if !is_valid_domain(&domain) {
        return Err(ApiError::validation(format!("'{domain}' is not a valid domain name")));
    }

    let slice = state.try_get_slice::<Domains>()?;
    let availability = slice.availability.check_availability(&domain).await?;

    Ok(Json(AvailabilityReport {
        domain: availability.domain_name,
        available: availability.available,
        price_usd: availability.price_usd,
    }))
}
