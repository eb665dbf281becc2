use std::borrow::Cow;

/// A specialized [`GatewayError`] enum of this crate.
///
/// Every upstream-facing failure is folded into one of these variants so the
/// API layer can map the whole family to a single HTTP 502 without inspecting
/// individual services.
#[ihub_derive::ihub_error]
pub enum GatewayError {
    /// Client misconfiguration (bad base URL, missing credential).
    #[error("Gateway configuration error{}: {message}", format_context(.context))]
    Configuration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("Gateway transport error{}: {source}", format_context(.context))]
    Transport {
        #[source]
        source: reqwest::Error,
        context: Option<Cow<'static, str>>,
    },

    /// The upstream answered with a non-success status.
    #[error("Upstream '{service}' returned {status}{}: {message}", format_context(.context))]
    Upstream {
        service: Cow<'static, str>,
        status: u16,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// The upstream answered 2xx but the payload did not decode.
    #[error("Upstream '{service}' sent an undecodable payload{}: {message}", format_context(.context))]
    Decode {
        service: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal gateway error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
