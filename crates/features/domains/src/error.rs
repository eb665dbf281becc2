use ihub_database::DatabaseError;
use ihub_feed::FeedError;
use ihub_gateway::GatewayError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`DomainsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum DomainsError {
    /// Malformed domain name or payload.
    #[error("Domain validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Unknown registration.
    #[error("Domain registration not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Registration state forbids the request.
    #[error("Domain registration conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Domain storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Third-party provisioning failures.
    #[error("Domain gateway error{}: {source}", format_context(.context))]
    Gateway {
        #[source]
        source: GatewayError,
        context: Option<Cow<'static, str>>,
    },
    /// Change feed failures.
    #[error("Domain feed error{}: {source}", format_context(.context))]
    Feed {
        #[source]
        source: FeedError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal domain error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<DomainsError> for ApiError {
    fn from(err: DomainsError) -> Self {
        match err {
            DomainsError::Validation { message, context } => Self::Validation { message, context },
            DomainsError::NotFound { message, context } => Self::NotFound { message, context },
            DomainsError::Conflict { message, context } => Self::Conflict { message, context },
            DomainsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            DomainsError::Gateway { source, .. } => Self::from(source),
            DomainsError::Feed { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            DomainsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
