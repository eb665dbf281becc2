use crate::server::ApiError;
use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use ihub_domain::config::{ApiConfig, JwtConfig};
use ihub_domain::constants::ROLE_ADMIN;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The JWT claim set this API understands.
///
/// `upn` is the partition key: non-admin callers only ever see records whose
/// `upn` field equals this claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub upn: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: u64,
    pub iss: String,
}

impl Claims {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ADMIN)
    }

    /// Whether this caller may touch a record owned by `upn`.
    #[must_use]
    pub fn owns(&self, upn: &str) -> bool {
        self.is_admin() || self.upn == upn
    }
}

#[ihub_derive::ihub_error]
pub enum SecurityError {
    #[error("Token error{}: {message}", format_context(.context))]
    Token { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<SecurityError> for ApiError {
    fn from(err: SecurityError) -> Self {
        Self::unauthorized(err.to_string())
    }
}

fn build_validation(cfg: &JwtConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&cfg.issuer]);
    validation.leeway = cfg.clock_skew_seconds;
    match &cfg.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    validation
}

/// Validates a bearer token and returns its claims.
///
/// # Errors
/// Returns [`SecurityError::Token`] for signature, expiry, or issuer failures.
pub fn decode_token(token: &str, cfg: &JwtConfig) -> Result<Claims, SecurityError> {
    let key = DecodingKey::from_secret(cfg.secret.as_bytes());
    decode::<Claims>(token, &key, &build_validation(cfg))
        .map(|data| data.claims)
        .map_err(|e| SecurityError::Token { message: e.to_string().into(), context: None })
}

/// Signs a claim set. Used by tests and local tooling; token issuance is
/// otherwise an upstream identity provider's job.
///
/// # Errors
/// Returns [`SecurityError::Token`] when signing fails.
pub fn encode_token(claims: &Claims, cfg: &JwtConfig) -> Result<String, SecurityError> {
    let key = EncodingKey::from_secret(cfg.secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| SecurityError::Token { message: e.to_string().into(), context: None })
}

fn bearer_claims<S>(parts: &Parts, state: &S) -> Result<Claims, ApiError>
where
    ApiConfig: FromRef<S>,
{
    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let cfg = ApiConfig::from_ref(state);
    Ok(decode_token(token, &cfg.security.jwt)?)
}

/// Any authenticated caller. Rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        bearer_claims(parts, state).map(Self)
    }
}

// A present-but-invalid token still rejects; only a missing header yields None.
impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(None);
        }
        bearer_claims(parts, state).map(|claims| Some(Self(claims)))
    }
}

/// An authenticated caller holding the `Admin` role. Rejects with 401/403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let claims = bearer_claims(parts, state)?;
        if !claims.is_admin() {
            return Err(ApiError::forbidden("Admin role required"));
        }
        Ok(Self(claims))
    }
}
