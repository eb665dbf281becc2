use ihub_gateway::GatewayError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`BooksError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum BooksError {
    /// Malformed query.
    #[error("Book search validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Unknown page or title.
    #[error("Book resource not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Every queried catalogue failed.
    #[error("Book catalogues unavailable{}: {message}", format_context(.context))]
    Upstream { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Single-integration failures.
    #[error("Book gateway error{}: {source}", format_context(.context))]
    Gateway {
        #[source]
        source: GatewayError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal book error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<BooksError> for ApiError {
    fn from(err: BooksError) -> Self {
        match err {
            BooksError::Validation { message, context } => Self::Validation { message, context },
            BooksError::NotFound { message, context } => Self::NotFound { message, context },
            BooksError::Upstream { message, context } => Self::Upstream { message, context },
            BooksError::Gateway { source, .. } => Self::from(source),
            BooksError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
