use ihub_database::DatabaseError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`AuthorsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum AuthorsError {
    /// Input failed validation.
    #[error("Author validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The requested author does not exist (or is not visible to the caller).
    #[error("Author not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Author storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal author error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<AuthorsError> for ApiError {
    fn from(err: AuthorsError) -> Self {
        match err {
            AuthorsError::Validation { message, context } => Self::Validation { message, context },
            AuthorsError::NotFound { message, context } => Self::NotFound { message, context },
            AuthorsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            AuthorsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
