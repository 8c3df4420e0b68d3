//! Response type shared by canned replies and real pass-through responses.

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    StatusCode,
};

/// Fully drained HTTP response handed back to a test.
#[derive(Debug, Clone)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

impl TestResponse {
    /// Empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// JSON response with a `content-type: application/json` header.
    pub fn json(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            status,
            body: body.into(),
            headers,
        }
    }

    /// Body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Split into the `(status, body, headers)` triple.
    pub fn into_parts(self) -> (StatusCode, Vec<u8>, HeaderMap) {
        (self.status, self.body, self.headers)
    }
}
