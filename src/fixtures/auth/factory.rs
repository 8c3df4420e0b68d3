//! Factory functions for token claims.
//!
//! Claims are a flat JSON object: the fixed `uid` and `private_channel` markers, the caller's
//! `user_id` and `roles`, and any extra claims a test adds on top.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constant::{CHANNEL_MARKER, SUBJECT_MARKER};

/// Claims carried by a minted test token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub uid: String,
    pub private_channel: String,
    pub user_id: i64,
    pub roles: Vec<String>,
    /// Additional top level claims, serialized alongside the fixed ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenClaims {
    /// Add or replace a top level claim.
    ///
    /// Names that collide with the fixed claims are ignored so the token always carries the
    /// values the verifier under test expects.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if !matches!(
            name.as_str(),
            "uid" | "private_channel" | "user_id" | "roles"
        ) {
            self.extra.insert(name, value.into());
        }
        self
    }

    /// Add `iat` set to now and `exp` set to now plus `ttl`, both as unix timestamps.
    pub fn with_expiry(self, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        self.with_claim("iat", now.timestamp())
            .with_claim("exp", (now + ttl).timestamp())
    }
}

/// Create claims with the fixed markers for the given user and roles.
///
/// # Arguments
/// - `user_id` - Value of the `user_id` claim
/// - `roles` - Role names, kept in the order given
///
/// # Returns
/// - `TokenClaims` - Claims with no extra entries
pub fn mock_token_claims<I, S>(user_id: i64, roles: I) -> TokenClaims
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TokenClaims {
        uid: SUBJECT_MARKER.to_string(),
        private_channel: CHANNEL_MARKER.to_string(),
        user_id,
        roles: roles.into_iter().map(Into::into).collect(),
        extra: Map::new(),
    }
}
