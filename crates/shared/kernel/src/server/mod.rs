//! Shared HTTP surface: application state, the uniform API error, and the
//! system routes every deployment carries.

mod error;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ApiErrorExt};
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
