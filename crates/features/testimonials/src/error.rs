use ihub_database::DatabaseError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`TestimonialsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum TestimonialsError {
    /// Input failed validation.
    #[error("Testimonial validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The requested testimonial is missing or not visible.
    #[error("Testimonial not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The testimonial is already in the requested state.
    #[error("Testimonial conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Testimonial storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal testimonial error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<TestimonialsError> for ApiError {
    fn from(err: TestimonialsError) -> Self {
        match err {
            TestimonialsError::Validation { message, context } => {
                Self::Validation { message, context }
            }
            TestimonialsError::NotFound { message, context } => Self::NotFound { message, context },
            TestimonialsError::Conflict { message, context } => Self::Conflict { message, context },
            TestimonialsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            TestimonialsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
