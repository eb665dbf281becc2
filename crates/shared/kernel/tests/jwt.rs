use ihub_domain::config::JwtConfig;
use ihub_kernel::security::{Claims, decode_token, encode_token};

fn test_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_owned(),
        issuer: "ihub".to_owned(),
        audience: None,
        clock_skew_seconds: 30,
    }
}

fn claims_for(upn: &str, roles: &[&str], exp: u64) -> Claims {
    Claims {
        sub: format!("sub-{upn}"),
        upn: upn.to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        exp,
        iss: "ihub".to_owned(),
    }
}

fn future_exp() -> u64 {
    jsonwebtoken::get_current_timestamp() + 3600
}

#[test]
fn roundtrip_preserves_claims() {
    let cfg = test_config();
    let claims = claims_for("writer@example.com", &["Admin"], future_exp());

    let token = encode_token(&claims, &cfg).unwrap();
    let decoded = decode_token(&token, &cfg).unwrap();

    assert_eq!(decoded.upn, "writer@example.com");
    assert!(decoded.is_admin());
}

#[test]
fn expired_token_is_rejected() {
    let cfg = test_config();
    // well past the configured clock skew
    let claims = claims_for("writer@example.com", &[], jsonwebtoken::get_current_timestamp() - 3600);

    let token = encode_token(&claims, &cfg).unwrap();
    assert!(decode_token(&token, &cfg).is_err());
}

#[test]
fn wrong_issuer_is_rejected() {
    let cfg = test_config();
    let mut claims = claims_for("writer@example.com", &[], future_exp());
    claims.iss = "someone-else".to_owned();

    let token = encode_token(&claims, &cfg).unwrap();
    assert!(decode_token(&token, &cfg).is_err());
}

#[test]
fn wrong_secret_is_rejected() {
    let cfg = test_config();
    let claims = claims_for("writer@example.com", &[], future_exp());
    let token = encode_token(&claims, &cfg).unwrap();

    let other = JwtConfig { secret: "other-secret".to_owned(), ..test_config() };
    assert!(decode_token(&token, &other).is_err());
}

#[test]
fn ownership_rules() {
    let admin = claims_for("admin@example.com", &["Admin"], future_exp());
    let user = claims_for("writer@example.com", &["Author"], future_exp());

    assert!(admin.owns("anyone@example.com"));
    assert!(user.owns("writer@example.com"));
    assert!(!user.owns("someone-else@example.com"));
    assert!(!user.is_admin());
}
