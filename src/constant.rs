//! Fixed values shared by the token minter and the discovery mocks.
//!
//! These values are not real credentials. The private key below only exists so that
//! tokens minted during tests verify against the mocked JWKS documents.

/// Key ID placed in the header of every minted token and in every mocked JWKS entry.
pub static TEST_KID: &str = "iavFkL-RHipSr2PLhZ_u8gDDBBWc__e-0bVCPPkc0Tw";

/// PKCS#1 encoded RSA private key used to sign test tokens.
pub static TEST_PRIVATE_KEY_PEM: &str = include_str!("./fixtures/auth/private_test_rsa_key.pem");

/// Signing algorithm requested from the JWT backend.
pub static TEST_SIGNING_ALGORITHM: &str = "RS512";

/// Hosts whose key discovery endpoint is answered with the canned JWKS document.
///
/// Production, secondary environment and staging, in that order.
pub static DISCOVERY_HOSTS: [&str; 3] = [
    "https://www.snaplinker.com",
    "https://snaplinker.atomicjolt.xyz",
    "https://beta.snaplinker.com",
];

/// Path of the key discovery document on every discovery host.
pub static JWKS_PATH: &str = "/jwks.json";

/// Environment variable holding the base URL of the external test dependency.
pub static DEPENDENCY_URL_VAR: &str = "AWS_TEST_DYNAMODB";

/// Optional comma separated override for [`DISCOVERY_HOSTS`].
pub static DISCOVERY_HOSTS_VAR: &str = "SNAPTEST_DISCOVERY_HOSTS";

/// Value of the fixed `uid` claim.
pub static SUBJECT_MARKER: &str = "uid";

/// Value of the fixed `private_channel` claim.
pub static CHANNEL_MARKER: &str = "channel";
