use reqwest::{Method, StatusCode, Url};

use crate::{error::HarnessError, model::TestResponse};

/// What happens to a request matched by a rule.
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Short-circuit with a canned response.
    Reply(TestResponse),
    /// Let the request reach the real network.
    Passthrough,
}

/// A single interception rule.
///
/// Rules match on the base URL's scheme, host and port, the base URL's path as a prefix,
/// and optionally an HTTP method plus a path appended to that prefix. Built fluently:
///
/// ```no_run
/// use snaptest::{intercept::InterceptRule, TestResponse};
/// use reqwest::StatusCode;
///
/// # fn example() -> Result<(), snaptest::HarnessError> {
/// let rule = InterceptRule::new("https://www.snaplinker.com")?
///     .get("/jwks.json")
///     .persist()
///     .reply(TestResponse::json(StatusCode::OK, r#"{"keys":[]}"#));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct InterceptRule {
    base: Url,
    method: Option<Method>,
    path: Option<String>,
    persist: bool,
    action: InterceptAction,
}

impl InterceptRule {
    /// Create a rule for every request under `base_url`.
    ///
    /// Until [`reply`](Self::reply) or [`enable_networking`](Self::enable_networking) is called
    /// the rule answers with an empty `200 OK`. Rules are consumed by their first match unless
    /// marked with [`persist`](Self::persist).
    ///
    /// # Returns
    /// - `Ok(InterceptRule)` - Rule matching all methods and paths under `base_url`
    /// - `Err(HarnessError::InvalidUrl)` - `base_url` is not an absolute URL with a host
    pub fn new(base_url: &str) -> Result<Self, HarnessError> {
        Ok(Self {
            base: parse_url(base_url)?,
            method: None,
            path: None,
            persist: false,
            action: InterceptAction::Reply(TestResponse::new(StatusCode::OK)),
        })
    }

    /// Only match `method` requests to `path` below the base URL.
    pub fn method(mut self, method: Method, path: impl Into<String>) -> Self {
        self.method = Some(method);
        self.path = Some(path.into());
        self
    }

    /// Only match `GET` requests to `path` below the base URL.
    ///
    /// # Arguments
    /// - `path` - Exact path appended to the base URL's path, e.g. `/jwks.json`
    ///
    /// # Returns
    /// - `InterceptRule` - The rule narrowed to one method and path
    pub fn get(self, path: impl Into<String>) -> Self {
        self.method(Method::GET, path)
    }

    /// Only match `POST` requests to `path` below the base URL.
    ///
    /// # Arguments
    /// - `path` - Exact path appended to the base URL's path
    ///
    /// # Returns
    /// - `InterceptRule` - The rule narrowed to one method and path
    pub fn post(self, path: impl Into<String>) -> Self {
        self.method(Method::POST, path)
    }

    /// Keep the rule registered after it matches.
    pub fn persist(mut self) -> Self {
        self.persist = true;
        self
    }

    /// Answer matched requests with a canned response instead of touching the network.
    ///
    /// # Arguments
    /// - `response` - Status, body and headers returned for every match
    ///
    /// # Returns
    /// - `InterceptRule` - The rule with its action replaced
    pub fn reply(mut self, response: TestResponse) -> Self {
        self.action = InterceptAction::Reply(response);
        self
    }

    /// Let matched requests through to the real endpoint.
    pub fn enable_networking(mut self) -> Self {
        self.action = InterceptAction::Passthrough;
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    pub fn action(&self) -> &InterceptAction {
        &self.action
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Whether a request with `method` to `url` is handled by this rule.
    pub fn matches(&self, method: &Method, url: &Url) -> bool {
        if url.scheme() != self.base.scheme()
            || url.host_str() != self.base.host_str()
            || url.port_or_known_default() != self.base.port_or_known_default()
        {
            return false;
        }

        let prefix = self.base.path().trim_end_matches('/');
        let path = url.path();

        match (&self.method, &self.path) {
            (Some(expected), Some(suffix)) => {
                expected == method && path == format!("{}{}", prefix, suffix)
            }
            _ => {
                prefix.is_empty()
                    || path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Parse an absolute URL that names a host.
pub(crate) fn parse_url(url: &str) -> Result<Url, HarnessError> {
    let parsed = Url::parse(url).map_err(|e| HarnessError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.host_str().is_none() {
        return Err(HarnessError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}
