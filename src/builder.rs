//! Declarative test setup.
//!
//! `TestBuilder` queues mock endpoints for the host under test and extra interception rules,
//! then `build()` starts the local server, registers everything and returns a
//! [`TestContext`].

use mockito::Mock;

use crate::{
    config::HarnessConfig, context::TestContext, error::HarnessError, intercept::InterceptRule,
};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    config: HarnessConfig,
    dependency_url: Option<String>,

    // Mock endpoints to create on the local server
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Interception rules registered ahead of the standard ones
    rules: Vec<InterceptRule>,
}

impl TestBuilder {
    /// Create a builder using [`HarnessConfig::default`].
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
            dependency_url: None,
            mock_builders: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Create a builder using [`HarnessConfig::from_env`].
    ///
    /// Loads `.env` and honors `SNAPTEST_DISCOVERY_HOSTS` before any `with_*` call.
    ///
    /// # Returns
    /// - `TestBuilder` - Builder with the environment-derived configuration
    pub fn from_env() -> Self {
        Self::new().with_config(HarnessConfig::from_env())
    }

    /// Replace the harness configuration.
    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `url` as the external dependency instead of reading it from the environment.
    pub fn with_dependency_url(mut self, url: impl Into<String>) -> Self {
        self.dependency_url = Some(url.into());
        self
    }

    /// Add another host whose JWKS endpoint returns the canned document.
    pub fn with_discovery_host(mut self, base_url: impl Into<String>) -> Self {
        self.config.discovery_hosts.push(base_url.into());
        self
    }

    /// Add an interception rule.
    ///
    /// Custom rules are registered before the standard ones so they win for overlapping
    /// requests, e.g. a test that needs a discovery host to fail.
    pub fn with_rule(mut self, rule: InterceptRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a mock endpoint on the local server standing in for the host under test.
    ///
    /// # Arguments
    /// - `setup` - Closure that receives the mock server and returns a configured Mock
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// 1. Starts the local mock server and parses the signing key
    /// 2. Creates the queued mock endpoints
    /// 3. Registers custom rules, then the standard pass-through and discovery rules
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(HarnessError::MissingEnvVar)` - No dependency URL given and the variable is unset
    /// - `Err(HarnessError::KeyParse)` / `Err(HarnessError::UnsupportedAlgorithm)` - Bad key
    pub async fn build(self) -> Result<TestContext, HarnessError> {
        let mut context = TestContext::new(self.config).await?;

        let mut mocks = Vec::new();
        for builder in self.mock_builders {
            mocks.push(builder(&mut context.server));
        }
        context.mocks = mocks;

        // Custom rules first so they take precedence under first-match-wins
        let url = context.url();
        context.interceptor.register_all(self.rules);
        context
            .interceptor
            .configure_mocks_with(&url, self.dependency_url.as_deref(), &context.config)?;

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
