//! Request helper for tests.

use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    IntoUrl, Request,
};

use crate::{error::HarnessError, intercept::Interceptor, model::TestResponse};

/// Sends requests through an [`Interceptor`], optionally authenticated with a bearer token.
#[derive(Clone)]
pub struct RequestRunner {
    interceptor: Interceptor,
}

impl RequestRunner {
    pub fn new(interceptor: Interceptor) -> Self {
        Self { interceptor }
    }

    /// Send `request`, setting `Authorization: Bearer <token>` when `bearer_token` is non-empty.
    ///
    /// # Returns
    /// - `Ok(TestResponse)` - Status, fully read body and headers
    /// - `Err(HarnessError::Transport)` / `Err(HarnessError::Blocked)` - Request did not complete
    /// - `Err(HarnessError::InvalidHeader)` - Token cannot be used as a header value
    /// - `Err(HarnessError::BodyDrain)` - Body could not be read, a fatal harness error
    pub async fn run(
        &self,
        mut request: Request,
        bearer_token: &str,
    ) -> Result<TestResponse, HarnessError> {
        if !bearer_token.is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", bearer_token))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        self.interceptor.execute(request).await
    }

    /// `GET url` with an optional bearer token.
    pub async fn get(
        &self,
        url: impl IntoUrl,
        bearer_token: &str,
    ) -> Result<TestResponse, HarnessError> {
        let request = self
            .interceptor
            .client()
            .get(url)
            .build()
            .map_err(HarnessError::Transport)?;

        self.run(request, bearer_token).await
    }
}
