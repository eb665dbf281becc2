use ihub_gateway::GatewayError;
use ihub_kernel::server::ApiError;
use std::borrow::Cow;

/// A specialized [`BillingError`] enum of this crate.
#[ihub_derive::ihub_error]
pub enum BillingError {
    /// Malformed payload.
    #[error("Billing validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Stripe failures.
    #[error("Billing gateway error{}: {source}", format_context(.context))]
    Gateway {
        #[source]
        source: GatewayError,
        context: Option<Cow<'static, str>>,
    },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal billing error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Validation { message, context } => Self::Validation { message, context },
            BillingError::Gateway { source, .. } => Self::from(source),
            BillingError::Internal { message, context } => Self::Internal { message, context },
        }
    }
}
