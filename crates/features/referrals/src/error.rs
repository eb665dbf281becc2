use ihub_database::DatabaseError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`ReferralsError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum ReferralsError {
    /// Input failed validation.
    #[error("Referral validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Unknown referral code or record.
    #[error("Referral not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Self-claims and duplicate codes land here.
    #[error("Referral conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Storage failures.
    #[error("Referral storage error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal referral error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<ReferralsError> for ApiError {
    fn from(err: ReferralsError) -> Self {
        match err {
            ReferralsError::Validation { message, context } => {
                Self::Validation { message, context }
            }
            ReferralsError::NotFound { message, context } => Self::NotFound { message, context },
            ReferralsError::Conflict { message, context } => Self::Conflict { message, context },
            ReferralsError::Database { source, context } => {
                Self::Internal { message: source.to_string().into(), context }
            }
            ReferralsError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
