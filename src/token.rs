//! Test token minting.
//!
//! Tokens are compact JWS strings signed with the harness [`SigningKey`]. The header carries
//! the key's `kid` so a verifier resolving keys through the mocked JWKS document finds the
//! matching public key.

use dioxus_logger::tracing;
use jsonwebtoken::{encode, Header};

use crate::{
    error::HarnessError,
    fixtures::auth::{mock_token_claims, TokenClaims},
    key::SigningKey,
};

/// Signs test tokens with a fixed key.
#[derive(Debug, Clone)]
pub struct TokenMinter {
    key: SigningKey,
}

impl TokenMinter {
    /// Create a minter signing with `key`.
    ///
    /// # Arguments
    /// - `key` - Parsed private key; its kid and algorithm go into every token header
    ///
    /// # Returns
    /// - `TokenMinter` - Minter reusing the parsed key for each token
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Minter backed by the bundled RS512 test key.
    pub fn with_test_key() -> Result<Self, HarnessError> {
        Ok(Self::new(SigningKey::test_key()?))
    }

    /// The key tokens are signed with.
    ///
    /// # Returns
    /// - `&SigningKey` - Key whose public half is published in the discovery document
    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    /// Claims for `user_id` and `roles` with the fixed markers, ready to adjust and [`sign`].
    ///
    /// [`sign`]: TokenMinter::sign
    pub fn claims<I, S>(&self, user_id: i64, roles: I) -> TokenClaims
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        mock_token_claims(user_id, roles)
    }

    /// Mint a signed token for `user_id` holding `roles`.
    ///
    /// # Returns
    /// - `Ok(String)` - Token in `header.claims.signature` form
    /// - `Err(HarnessError::Signing)` - The JWT backend failed to sign
    pub fn mint<I, S>(&self, user_id: i64, roles: I) -> Result<String, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sign(&self.claims(user_id, roles))
    }

    /// Sign arbitrary claims with the minter's key and `kid`.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, HarnessError> {
        let mut header = Header::new(self.key.algorithm());
        header.kid = Some(self.key.kid().to_string());

        let token =
            encode(&header, claims, self.key.encoding_key()).map_err(HarnessError::Signing)?;

        tracing::debug!(
            "Minted {:?} token for user {} with roles {:?}",
            header.alg,
            claims.user_id,
            claims.roles
        );

        Ok(token)
    }
}

/// Mint a token with the bundled test key.
///
/// Parses the key on every call. Keep a [`TokenMinter`] around when minting many tokens.
pub fn mint_token<I, S>(user_id: i64, roles: I) -> Result<String, HarnessError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TokenMinter::with_test_key()?.mint(user_id, roles)
}
