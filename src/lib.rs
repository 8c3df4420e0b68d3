//! Test harness for services that authenticate requests with RS512 signed tokens and
//! resolve verification keys through remote JWKS discovery endpoints.
//!
//! - [`TokenMinter`] signs tokens whose `kid` matches the mocked JWKS document.
//! - [`Interceptor`] answers the known discovery hosts with that document, lets the host
//!   under test and the external dependency through, and blocks everything else.
//! - [`RequestRunner`] sends requests through the interceptor with an optional bearer token.

pub mod builder;
pub mod config;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod intercept;
pub mod key;
pub mod model;
pub mod runner;
pub mod token;

pub use builder::TestBuilder;
pub use config::HarnessConfig;
pub use context::TestContext;
pub use error::{FatalExt, HarnessError, Severity};
pub use intercept::{InterceptRule, Interceptor};
pub use key::SigningKey;
pub use model::TestResponse;
pub use runner::RequestRunner;
pub use token::{mint_token, TokenMinter};

pub mod prelude {
    pub use crate::{
        fixtures::auth::TokenClaims, mint_token, FatalExt, HarnessConfig, HarnessError,
        InterceptRule, Interceptor, RequestRunner, TestBuilder, TestContext, TestResponse,
        TokenMinter,
    };
}
