//! RSA signing key shared by the token minter and the mocked JWKS document.

use std::{fmt, str::FromStr};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{Algorithm, EncodingKey};
use openssl::rsa::Rsa;

use crate::{
    constant::{TEST_KID, TEST_PRIVATE_KEY_PEM, TEST_SIGNING_ALGORITHM},
    error::HarnessError,
};

/// Parsed RSA private key bound to a single key ID and signing algorithm.
///
/// The public modulus and exponent are extracted once at construction so that the
/// JWKS document served by the interceptor always describes the key the minter signs with.
#[derive(Clone)]
pub struct SigningKey {
    kid: String,
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    n: String,
    e: String,
}

impl SigningKey {
    /// Parse a PEM encoded RSA private key and resolve the named signing algorithm.
    ///
    /// # Arguments
    /// - `pem` - PKCS#1 or PKCS#8 PEM encoded RSA private key
    /// - `kid` - Key ID written into token headers and the JWKS document
    /// - `algorithm` - Algorithm name such as `RS512`
    ///
    /// # Returns
    /// - `Ok(SigningKey)` - Key ready for signing
    /// - `Err(HarnessError::KeyParse)` - PEM is malformed or not an RSA private key
    /// - `Err(HarnessError::UnsupportedAlgorithm)` - Unknown algorithm or not an RSA algorithm
    pub fn from_pem(
        pem: &[u8],
        kid: impl Into<String>,
        algorithm: &str,
    ) -> Result<Self, HarnessError> {
        let rsa = Rsa::private_key_from_pem(pem).map_err(HarnessError::key_parse)?;
        let encoding_key = EncodingKey::from_rsa_pem(pem).map_err(HarnessError::key_parse)?;

        let algorithm = resolve_algorithm(algorithm)?;

        // Base64URL encode the modulus & exponent for the JWKS entry
        let n = URL_SAFE_NO_PAD.encode(rsa.n().to_vec());
        let e = URL_SAFE_NO_PAD.encode(rsa.e().to_vec());

        Ok(Self {
            kid: kid.into(),
            algorithm,
            encoding_key,
            n,
            e,
        })
    }

    /// The bundled test key with its fixed key ID, signing with RS512.
    pub fn test_key() -> Result<Self, HarnessError> {
        Self::from_pem(
            TEST_PRIVATE_KEY_PEM.as_bytes(),
            TEST_KID,
            TEST_SIGNING_ALGORITHM,
        )
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Base64URL (no padding) encoded public modulus.
    pub fn modulus(&self) -> &str {
        &self.n
    }

    /// Base64URL (no padding) encoded public exponent.
    pub fn exponent(&self) -> &str {
        &self.e
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Resolve an algorithm name, accepting only the RSA families.
fn resolve_algorithm(name: &str) -> Result<Algorithm, HarnessError> {
    let algorithm = Algorithm::from_str(name)
        .map_err(|_| HarnessError::UnsupportedAlgorithm(name.to_string()))?;

    match algorithm {
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => Ok(algorithm),
        _ => Err(HarnessError::UnsupportedAlgorithm(name.to_string())),
    }
}
