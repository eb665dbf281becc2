use crate::Referrals;
use crate::models::{ClaimReferral, Referral};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_domain::constants::TAG_REFERRALS;
use ihub_kernel::prelude::*;

#[api_handler(
    post,
    path = "/api/referrals",
    responses((status = CREATED, description = "Fresh referral code", body = Referral)),
    tag = TAG_REFERRALS,
)]
pub(super) async fn create_referral(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<(StatusCode, Json<Referral>), ApiError> {
    let slice = state.try_get_slice::<Referrals>()?;
    let referral = slice.repository.create(&claims.upn).await?;
    Ok((StatusCode::CREATED, Json(referral)))
}

#[api_handler(
    get,
    path = "/api/referrals",
    responses((status = OK, description = "Referral codes visible to the caller", body = [Referral])),
    tag = TAG_REFERRALS,
)]
pub(super) async fn list_referrals(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<Vec<Referral>>, ApiError> {
    let slice = state.try_get_slice::<Referrals>()?;
    let referrals = if claims.is_admin() {
        slice.repository.list_all().await?
    } else {
        slice.repository.list_for(&claims.upn).await?
    };
    Ok(Json(referrals))
}

#[api_handler(
    post,
    path = "/api/referrals/claim",
    request_body = ClaimReferral,
    responses((status = OK, description = "Referral after the claim", body = Referral)),
    tag = TAG_REFERRALS,
)]
pub(super) async fn claim_referral(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<ClaimReferral>,
) -> Result<Json<Referral>, ApiError> {
    let code = payload.code.trim();
    if code.is_empty() {
        return Err(ApiError::validation("code must not be empty"));
    }

    let slice = state.try_get_slice::<Referrals>()?;
    let referral = slice.repository.claim(code, &claims.upn).await?;
    Ok(Json(referral))
}
