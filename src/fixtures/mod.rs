//! Fixture modules for tokens and key discovery documents.
//!
//! - `auth` - token claims and the JWKS document matching the signing key

pub mod auth;
