use ihub_domain::config::{ApiConfig, DatabaseConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "ihub");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_some());
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "security": { "jwt": { "secret": "s3cret", "issuer": "test" } },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "gateway": {
            "whmcs": { "url": "http://whmcs.local", "identifier": "id", "secret": "sh" },
            "stripe": { "secret_key": "sk_test" }
        }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.security.jwt.issuer, "test");
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.gateway.whmcs.url, "http://whmcs.local");
    assert_eq!(cfg.gateway.whmcs.registration_years, 1);
    assert_eq!(cfg.gateway.stripe.secret_key, "sk_test");
    // untouched sections keep their defaults
    assert_eq!(cfg.gateway.wikipedia.url, "https://en.wikipedia.org/api/rest_v1");
}
