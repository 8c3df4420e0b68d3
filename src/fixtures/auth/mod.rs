pub mod factory;
pub mod jwks;

pub use factory::{mock_token_claims, TokenClaims};
pub use jwks::{mock_jwt_keys, mock_jwt_keys_body, Jwk, JwkSet};
