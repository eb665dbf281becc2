//! Convenience re-exports for slice and handler code.

pub use crate::safe_nanoid;
pub use crate::security::{AdminUser, AuthUser, Claims, ResourceGuard};
pub use crate::server::{ApiError, ApiErrorExt, ApiState};
