//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! The context owns a local mockito server standing in for the host under test, the
//! interceptor configured for it, a token minter and a runner that sends requests through the
//! interceptor.

use mockito::{Mock, Server, ServerGuard};

use crate::{
    config::HarnessConfig, error::HarnessError, intercept::Interceptor, model::TestResponse,
    runner::RequestRunner, token::TokenMinter,
};

/// Test environment produced by `TestBuilder::build()`.
///
/// ```ignore
/// let test = TestBuilder::new()
///     .with_dependency_url("http://localhost:8000")
///     .build()
///     .await?;
///
/// let token = test.mint(1, ["admin"])?;
/// let response = test.get(&format!("{}/me", test.url()), &token).await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    pub config: HarnessConfig,
    pub minter: TokenMinter,
    pub interceptor: Interceptor,
    pub runner: RequestRunner,

    /// Mock HTTP server for the host under test
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Start the local server and prepare an interceptor with no rules yet.
    pub(crate) async fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        let server = Server::new_async().await;

        let minter = TokenMinter::new(config.signing_key()?);
        let interceptor = Interceptor::new();
        let runner = RequestRunner::new(interceptor.clone());

        Ok(Self {
            config,
            minter,
            interceptor,
            runner,
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the local mock server, registered as the host under test.
    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Direct access to the local mock server for mocks added after `build()`.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Mint a token with the context's signing key.
    pub fn mint<I, S>(&self, user_id: i64, roles: I) -> Result<String, HarnessError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.minter.mint(user_id, roles)
    }

    /// `GET url` through the interceptor with an optional bearer token.
    pub async fn get(&self, url: &str, bearer_token: &str) -> Result<TestResponse, HarnessError> {
        self.runner.get(url, bearer_token).await
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
