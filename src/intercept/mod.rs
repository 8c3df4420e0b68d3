//! Outbound HTTP interception.
//!
//! An [`Interceptor`] holds an ordered list of [`InterceptRule`]s in front of a
//! `reqwest::Client`. Requests are checked against the rules in registration order and the
//! first match wins: it either answers with a canned [`TestResponse`] or lets the request
//! through to the network. Requests matching no rule are blocked.
//!
//! Rule state belongs to the interceptor value rather than the process, so every test can own
//! an isolated rule set. Clones share the same rules.

pub mod rule;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dioxus_logger::tracing;
use reqwest::{Method, Request, StatusCode, Url};

use crate::{
    config::HarnessConfig,
    error::HarnessError,
    fixtures::auth::mock_jwt_keys_body,
    model::TestResponse,
};

pub use rule::{InterceptAction, InterceptRule};

#[derive(Default)]
struct RuleSet {
    rules: Vec<InterceptRule>,
    unmatched: Vec<(Method, Url)>,
}

/// Ordered, first-match-wins rule list with default-deny behavior.
#[derive(Clone, Default)]
pub struct Interceptor {
    state: Arc<Mutex<RuleSet>>,
    client: reqwest::Client,
}

impl Interceptor {
    /// Create an interceptor with no rules, so every request is blocked.
    ///
    /// Pass-through requests use a default `reqwest::Client`; see
    /// [`with_client`](Self::with_client) to supply another.
    ///
    /// # Returns
    /// - `Interceptor` - Empty rule set, shared by all clones
    pub fn new() -> Self {
        Self::default()
    }

    /// Interceptor that passes allowed requests to `client`.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            state: Arc::default(),
            client,
        }
    }

    /// The client used for pass-through requests, also handy for building requests.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn lock(&self) -> MutexGuard<'_, RuleSet> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a rule after all rules registered so far.
    pub fn register(&self, rule: InterceptRule) {
        self.register_all(vec![rule]);
    }

    /// Append rules in order, all under one lock so the set is never seen half registered.
    pub fn register_all(&self, rules: Vec<InterceptRule>) {
        let mut state = self.lock();
        for rule in rules {
            let kind = match rule.action() {
                InterceptAction::Reply(_) => "reply",
                InterceptAction::Passthrough => "pass-through",
            };
            tracing::debug!("Registered {} rule for {}", kind, rule.base_url());
            state.rules.push(rule);
        }
    }

    /// Register the standard harness rules.
    ///
    /// In order: pass-through for `self_url`, pass-through for the external dependency named by
    /// [`HarnessConfig::dependency_url_var`], and a persistent `GET` on the JWKS path of every
    /// discovery host answering with the document for the configured signing key.
    ///
    /// Nothing is registered if any step fails.
    ///
    /// # Returns
    /// - `Ok(())` - All rules registered
    /// - `Err(HarnessError::MissingEnvVar)` - The dependency URL variable is unset or empty
    /// - `Err(HarnessError::InvalidUrl)` - A configured URL cannot be parsed
    /// - `Err(HarnessError::KeyParse)` / `Err(HarnessError::UnsupportedAlgorithm)` - Bad key config
    pub fn configure_mocks(
        &self,
        self_url: &str,
        config: &HarnessConfig,
    ) -> Result<(), HarnessError> {
        self.configure_mocks_with(self_url, None, config)
    }

    /// Same as [`configure_mocks`](Self::configure_mocks) with an explicit dependency URL.
    ///
    /// `None` falls back to the environment variable.
    pub fn configure_mocks_with(
        &self,
        self_url: &str,
        dependency_url: Option<&str>,
        config: &HarnessConfig,
    ) -> Result<(), HarnessError> {
        let rules = default_rules(self_url, dependency_url, config)?;
        let count = rules.len();

        self.register_all(rules);

        tracing::info!(
            "Configured {} interception rules for {} discovery hosts",
            count,
            config.discovery_hosts.len()
        );

        Ok(())
    }

    /// Send `request` through the rules.
    ///
    /// # Returns
    /// - `Ok(TestResponse)` - Canned reply or the drained real response
    /// - `Err(HarnessError::Blocked)` - No rule matched
    /// - `Err(HarnessError::Transport)` - Pass-through request failed to complete
    /// - `Err(HarnessError::BodyDrain)` - Pass-through response body could not be read
    pub async fn execute(&self, request: Request) -> Result<TestResponse, HarnessError> {
        let action = self.resolve(request.method(), request.url());

        match action {
            Some(InterceptAction::Reply(response)) => {
                tracing::debug!(
                    "Intercepted {} {} with status {}",
                    request.method(),
                    request.url(),
                    response.status
                );
                Ok(response)
            }
            Some(InterceptAction::Passthrough) => {
                tracing::debug!("Passing through {} {}", request.method(), request.url());

                let response = self
                    .client
                    .execute(request)
                    .await
                    .map_err(HarnessError::Transport)?;

                let status = response.status();
                let headers = response.headers().clone();
                let body = response.bytes().await.map_err(HarnessError::BodyDrain)?;

                Ok(TestResponse {
                    status,
                    body: body.to_vec(),
                    headers,
                })
            }
            None => {
                tracing::warn!(
                    "Blocked {} {}: no interception rule matched",
                    request.method(),
                    request.url()
                );
                Err(HarnessError::Blocked {
                    method: request.method().clone(),
                    url: request.url().to_string(),
                })
            }
        }
    }

    /// Find the first matching rule, consuming it if it is not persistent.
    fn resolve(&self, method: &Method, url: &Url) -> Option<InterceptAction> {
        let mut state = self.lock();

        let Some(index) = state.rules.iter().position(|rule| rule.matches(method, url)) else {
            state.unmatched.push((method.clone(), url.clone()));
            return None;
        };

        if state.rules[index].is_persistent() {
            Some(state.rules[index].action().clone())
        } else {
            Some(state.rules.remove(index).action().clone())
        }
    }

    /// Drop every rule and the unmatched request history.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.rules.clear();
        state.unmatched.clear();
    }

    /// Number of registered rules, persistent ones included.
    pub fn rule_count(&self) -> usize {
        self.lock().rules.len()
    }

    /// Non-persistent rules that have not matched yet.
    pub fn pending(&self) -> Vec<InterceptRule> {
        self.lock()
            .rules
            .iter()
            .filter(|rule| !rule.is_persistent())
            .cloned()
            .collect()
    }

    /// Whether every non-persistent rule has been consumed.
    pub fn is_done(&self) -> bool {
        self.lock().rules.iter().all(InterceptRule::is_persistent)
    }

    /// Requests that were blocked because no rule matched, oldest first.
    pub fn unmatched_requests(&self) -> Vec<(Method, Url)> {
        self.lock().unmatched.clone()
    }
}

/// Build the standard rule list without registering anything.
fn default_rules(
    self_url: &str,
    dependency_url: Option<&str>,
    config: &HarnessConfig,
) -> Result<Vec<InterceptRule>, HarnessError> {
    let dependency_url = match dependency_url {
        Some(url) if !url.is_empty() => url.to_string(),
        Some(_) => return Err(HarnessError::MissingEnvVar(config.dependency_url_var.clone())),
        None => config.dependency_url()?,
    };

    let mut rules = vec![
        // Register our local server
        InterceptRule::new(self_url)?.persist().enable_networking(),
        // Allow requests to the external test dependency
        InterceptRule::new(&dependency_url)?.persist().enable_networking(),
    ];

    let body = mock_jwt_keys_body(&config.signing_key()?)?;
    let response = TestResponse::json(StatusCode::OK, body);

    for host in &config.discovery_hosts {
        rules.push(
            InterceptRule::new(host)?
                .get(config.jwks_path.as_str())
                .persist()
                .reply(response.clone()),
        );
    }

    Ok(rules)
}
