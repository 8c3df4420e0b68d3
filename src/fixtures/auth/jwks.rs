//! Mock JWKS discovery document.

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::{error::HarnessError, key::SigningKey};

/// JWKS document as served on `/jwks.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// Single RSA public key entry.
///
/// Field order matches the order verifiers in the wild receive from the real discovery hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub e: String,
    pub n: String,
    pub kid: String,
    #[serde(rename = "use")]
    pub r#use: String,
    pub alg: Algorithm,
}

/// Build the JWKS document describing the public half of `key`.
pub fn mock_jwt_keys(key: &SigningKey) -> JwkSet {
    JwkSet {
        keys: vec![Jwk {
            kty: "RSA".to_string(),
            e: key.exponent().to_string(),
            n: key.modulus().to_string(),
            kid: key.kid().to_string(),
            r#use: "sig".to_string(),
            alg: key.algorithm(),
        }],
    }
}

/// Serialize the JWKS document for `key` to the exact body served by the discovery mocks.
pub fn mock_jwt_keys_body(key: &SigningKey) -> Result<String, HarnessError> {
    Ok(serde_json::to_string(&mock_jwt_keys(key))?)
}
