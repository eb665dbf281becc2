use ihub_database::DatabaseError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`LeadsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum LeadsError {
    /// Input failed validation (malformed e-mail and the like).
    #[error("Lead validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The requested lead does not exist.
    #[error("Lead not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Lead storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal lead error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<LeadsError> for ApiError {
    fn from(err: LeadsError) -> Self {
        match err {
            LeadsError::Validation { message, context } => Self::Validation { message, context },
            LeadsError::NotFound { message, context } => Self::NotFound { message, context },
            LeadsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            LeadsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
