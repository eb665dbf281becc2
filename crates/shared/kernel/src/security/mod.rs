//! JWT validation, axum extractors, and resource-ID guards.

mod jwt;
mod resource;

pub use jwt::{AdminUser, AuthUser, Claims, SecurityError, SecurityErrorExt, decode_token, encode_token};
pub use resource::{ResourceGuard, ResourceGuardError, ResourceGuardErrorExt};
