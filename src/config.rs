use crate::{
    constant::{
        DEPENDENCY_URL_VAR, DISCOVERY_HOSTS, DISCOVERY_HOSTS_VAR, JWKS_PATH, TEST_KID,
        TEST_PRIVATE_KEY_PEM, TEST_SIGNING_ALGORITHM,
    },
    error::HarnessError,
    key::SigningKey,
};

/// Harness configuration: signing key, discovery hosts and the dependency URL variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub kid: String,
    pub private_key_pem: String,
    pub algorithm: String,
    /// Base URLs whose JWKS endpoint is answered with the canned document.
    pub discovery_hosts: Vec<String>,
    pub jwks_path: String,
    /// Name of the environment variable holding the external dependency's base URL.
    pub dependency_url_var: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            kid: TEST_KID.to_string(),
            private_key_pem: TEST_PRIVATE_KEY_PEM.to_string(),
            algorithm: TEST_SIGNING_ALGORITHM.to_string(),
            discovery_hosts: DISCOVERY_HOSTS.iter().map(|h| h.to_string()).collect(),
            jwks_path: JWKS_PATH.to_string(),
            dependency_url_var: DEPENDENCY_URL_VAR.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Defaults, with `.env` loaded and the discovery hosts optionally replaced by
    /// `SNAPTEST_DISCOVERY_HOSTS` (comma separated).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(hosts) = std::env::var(DISCOVERY_HOSTS_VAR) {
            let hosts: Vec<String> = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();

            if !hosts.is_empty() {
                config.discovery_hosts = hosts;
            }
        }

        config
    }

    /// Resolve the external dependency URL from the environment.
    ///
    /// # Returns
    /// - `Ok(String)` - Non-empty value of [`dependency_url_var`](Self::dependency_url_var)
    /// - `Err(HarnessError::MissingEnvVar)` - Variable unset or empty
    pub fn dependency_url(&self) -> Result<String, HarnessError> {
        match std::env::var(&self.dependency_url_var) {
            Ok(url) if !url.is_empty() => Ok(url),
            _ => Err(HarnessError::MissingEnvVar(self.dependency_url_var.clone())),
        }
    }

    /// Parse the configured private key.
    pub fn signing_key(&self) -> Result<SigningKey, HarnessError> {
        SigningKey::from_pem(
            self.private_key_pem.as_bytes(),
            self.kid.as_str(),
            &self.algorithm,
        )
    }
}
