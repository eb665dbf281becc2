use ihub_database::DatabaseError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`ExperimentsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum ExperimentsError {
    /// Input failed validation.
    #[error("Experiment validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Unknown or inactive experiment.
    #[error("Experiment not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Duplicate experiment name.
    #[error("Experiment conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Experiment storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal experiment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<ExperimentsError> for ApiError {
    fn from(err: ExperimentsError) -> Self {
        match err {
            ExperimentsError::Validation { message, context } => {
                Self::Validation { message, context }
            }
            ExperimentsError::NotFound { message, context } => Self::NotFound { message, context },
            ExperimentsError::Conflict { message, context } => Self::Conflict { message, context },
            ExperimentsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            ExperimentsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
