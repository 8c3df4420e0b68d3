//! Error type for the test harness.
//!
//! Every failure is classified as either [`Severity::Fatal`], meaning the harness itself
//! is misconfigured and the whole test run should stop, or [`Severity::Assertion`], meaning
//! only the test in progress should fail.

use dioxus_logger::tracing;
use reqwest::{header::InvalidHeaderValue, Method};
use thiserror::Error;

/// How a [`HarnessError`] should be surfaced by the test runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Harness configuration problem, abort the run.
    Fatal,
    /// Failure local to one test, report it and carry on.
    Assertion,
}

#[derive(Error, Debug)]
pub enum HarnessError {
    /// Signing key PEM is malformed or does not hold an RSA private key.
    #[error("Failed to parse RSA signing key from PEM")]
    KeyParse(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Algorithm name is unknown to the JWT backend or cannot be used with an RSA key.
    #[error("Couldn't find signing method: {0}")]
    UnsupportedAlgorithm(String),
    /// The JWT backend rejected the key or claims while signing.
    #[error("Failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("{0} must be set to run tests")]
    MissingEnvVar(String),
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    /// The response arrived but its body could not be read.
    #[error("Failed to read response body")]
    BodyDrain(#[source] reqwest::Error),
    #[error("error making the request: {0}")]
    Transport(#[source] reqwest::Error),
    /// No interception rule matched an outbound request.
    #[error("Blocked outbound request with no matching rule: {method} {url}")]
    Blocked { method: Method, url: String },
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl HarnessError {
    pub(crate) fn key_parse<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::KeyParse(Box::new(err))
    }

    /// Classify the error for the test runner.
    pub fn severity(&self) -> Severity {
        match self {
            Self::KeyParse(_)
            | Self::UnsupportedAlgorithm(_)
            | Self::Signing(_)
            | Self::MissingEnvVar(_)
            | Self::InvalidUrl { .. }
            | Self::Serialization(_)
            | Self::BodyDrain(_) => Severity::Fatal,
            Self::Transport(_) | Self::Blocked { .. } | Self::InvalidHeader(_) => {
                Severity::Assertion
            }
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Extension trait turning fatal harness errors into a process exit.
pub trait FatalExt<T> {
    /// Exit the process with status 1 if the result holds a fatal error.
    ///
    /// Assertion class errors are returned unchanged so the calling test can fail on its own
    /// while the rest of the run continues.
    fn exit_on_fatal(self) -> Result<T, HarnessError>;
}

impl<T> FatalExt<T> for Result<T, HarnessError> {
    fn exit_on_fatal(self) -> Result<T, HarnessError> {
        match self {
            Err(e) if e.is_fatal() => {
                tracing::error!("Test harness misconfigured: {}", e);
                eprintln!("Test harness misconfigured: {}", e);
                std::process::exit(1);
            }
            other => other,
        }
    }
}
