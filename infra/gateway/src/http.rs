use crate::error::GatewayError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::time::Duration;
use url::Url;

pub(crate) const USER_AGENT: &str = concat!("inkhub/", env!("CARGO_PKG_VERSION"));
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds the shared HTTP client every gateway integration clones from.
///
/// # Errors
/// Returns [`GatewayError::Configuration`] when the TLS backend cannot be
/// initialized.
pub fn build_client() -> Result<Client, GatewayError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GatewayError::Configuration {
            message: e.to_string().into(),
            context: Some("Building shared HTTP client".into()),
        })
}

/// Parses and normalizes a service base URL.
pub(crate) fn parse_base(
    service: &'static str,
    base_url: &str,
) -> Result<Url, GatewayError> {
    // joins silently replace the last path segment without the slash
    let normalized = if base_url.ends_with('/') {
        Cow::Borrowed(base_url)
    } else {
        Cow::Owned(format!("{base_url}/"))
    };
    Url::parse(&normalized).map_err(|e| GatewayError::Configuration {
        message: e.to_string().into(),
        context: Some(service.into()),
    })
}

pub(crate) fn join(
    service: &'static str,
    base: &Url,
    path: &str,
) -> Result<Url, GatewayError> {
    base.join(path).map_err(|e| GatewayError::Configuration {
        message: e.to_string().into(),
        context: Some(service.into()),
    })
}

/// Promotes a non-success response into [`GatewayError::Upstream`],
/// capturing the body for diagnostics.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: Response,
) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| String::from("<unreadable body>"));
    Err(GatewayError::Upstream {
        service: service.into(),
        status: status.as_u16(),
        message: truncate(message).into(),
        context: None,
    })
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, GatewayError> {
    let response = ensure_success(service, response).await?;
    response.json::<T>().await.map_err(|e| GatewayError::Decode {
        service: service.into(),
        message: e.to_string().into(),
        context: None,
    })
}

fn truncate(mut message: String) -> String {
    const LIMIT: usize = 512;
    if message.len() > LIMIT {
        let mut cut = LIMIT;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = parse_base("test", "https://api.example.com/v1").unwrap();
        let url = join("test", &base, "zones/example.com").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/zones/example.com");
    }

    #[test]
    fn invalid_base_url_is_configuration_error() {
        let result = parse_base("test", "not a url");
        assert!(matches!(result, Err(GatewayError::Configuration { .. })));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(2048);
        assert_eq!(truncate(body).len(), 512);
    }
}
