//! Shared helpers for integration tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use snaptest::{fixtures::auth::TokenClaims, HarnessConfig};

pub static DEPENDENCY_URL: &str = "http://localhost:8000";

/// Decode one base64url segment of a compact token into JSON.
pub fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .expect("segment is not base64url");
    serde_json::from_slice(&bytes).expect("segment is not JSON")
}

/// Config reading the dependency URL from a variable no other test touches.
pub fn config_with_dependency_var(var: &str) -> HarnessConfig {
    HarnessConfig {
        dependency_url_var: var.to_string(),
        ..Default::default()
    }
}

/// Verify `token` the way a service under test would: pick the key by `kid` from `jwks`.
pub fn verify_with_jwks(
    token: &str,
    jwks: &JwkSet,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let header = jsonwebtoken::decode_header(token)?;
    let kid = header.kid.unwrap_or_default();
    let jwk = jwks
        .find(&kid)
        .ok_or(jsonwebtoken::errors::ErrorKind::InvalidKeyFormat)?;

    let key = DecodingKey::from_jwk(jwk)?;

    let mut validation = Validation::new(Algorithm::RS512);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    Ok(jsonwebtoken::decode::<TokenClaims>(token, &key, &validation)?.claims)
}
