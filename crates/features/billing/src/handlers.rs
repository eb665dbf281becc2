use crate::Billing;
use crate::models::{BillingCustomer, Checkout};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use ihub_derive::api_handler;
use ihub_domain::constants::TAG_BILLING;
use ihub_kernel::prelude::*;

#[api_handler(
    get,
    path = "/api/billing/customer",
    responses((status = OK, description = "Stripe customer bound to the caller", body = BillingCustomer)),
    tag = TAG_BILLING,
)]
pub(super) async fn get_customer(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<BillingCustomer>, ApiError> {
    let slice = state.try_get_slice::<Billing>()?;
    Ok(Json(slice.service.customer_for(&claims.upn).await?))
}

#[api_handler(
    post,
    path = "/api/billing/checkout",
    responses((status = CREATED, description = "Hosted checkout session", body = Checkout)),
    tag = TAG_BILLING,
)]
pub(super) async fn create_checkout(
    State(state): State<ApiState>,
    AuthUser(claims): AuthUser,
) -> Result<(StatusCode, Json<Checkout>), ApiError> {
    let slice = state.try_get_slice::<Billing>()?;
    let checkout = slice.service.checkout_for(&claims.upn).await?;
    Ok((StatusCode::CREATED, Json(checkout)))
}
