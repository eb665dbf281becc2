use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (optional when using unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Optional API security knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: Option<String>,
    pub clock_skew_seconds: u64,
}

/// Third-party integration endpoints and credentials, one section per service.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub whmcs: WhmcsConfig,
    pub google_domains: KeyedServiceConfig,
    pub dns: TokenServiceConfig,
    pub front_door: TokenServiceConfig,
    pub stripe: StripeConfig,
    pub amazon: AmazonConfig,
    pub penguin: KeyedServiceConfig,
    pub wikipedia: PlainServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhmcsConfig {
    pub url: String,
    pub identifier: String,
    pub secret: String,
    pub registration_years: u32,
}

/// A service reached with an API key query/header credential.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyedServiceConfig {
    pub url: String,
    pub api_key: String,
}

/// A service reached with a bearer token.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TokenServiceConfig {
    pub url: String,
    pub token: String,
}

/// A service that takes no credential at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlainServiceConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StripeConfig {
    pub url: String,
    pub secret_key: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AmazonConfig {
    pub url: String,
    pub partner_tag: String,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "ihub".to_owned(),
            database: "core".to_owned(),
            credentials: Some(DatabaseCredentials::default()),
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "dev-only-change-me".to_owned(),
            issuer: "ihub".to_owned(),
            audience: None,
            clock_skew_seconds: 60,
        }
    }
}

impl Default for WhmcsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9101".to_owned(),
            identifier: String::new(),
            secret: String::new(),
            registration_years: 1,
        }
    }
}

impl Default for KeyedServiceConfig {
    fn default() -> Self {
        Self { url: "http://localhost:9102".to_owned(), api_key: String::new() }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self { url: "http://localhost:9103".to_owned(), token: String::new() }
    }
}

impl Default for PlainServiceConfig {
    fn default() -> Self {
        Self { url: "https://en.wikipedia.org/api/rest_v1".to_owned() }
    }
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            url: "https://api.stripe.com".to_owned(),
            secret_key: String::new(),
            price_id: String::new(),
            success_url: "http://localhost:4583/billing/success".to_owned(),
            cancel_url: "http://localhost:4583/billing/cancel".to_owned(),
        }
    }
}

impl Default for AmazonConfig {
    fn default() -> Self {
        Self {
            url: "https://webservices.amazon.com".to_owned(),
            partner_tag: String::new(),
        }
    }
}
