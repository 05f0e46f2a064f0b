//! Authentication strategies applied to outgoing smoke test requests.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// A strategy that attaches credentials to a request before it is dispatched.
pub trait Auth: fmt::Debug + Send + Sync {
    /// Mutates the request, e.g. by adding an `Authorization` header or a cookie.
    fn authenticate(&self, request: &mut Request<Body>);
}

/// Leaves the request unauthenticated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Auth for NoAuth {
    fn authenticate(&self, _request: &mut Request<Body>) {}
}

/// HTTP Basic authentication (`Authorization: Basic base64(user:password)`).
#[derive(Clone)]
pub struct BasicHttpAuth {
    username: String,
    password: String,
}

impl BasicHttpAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn header_value(&self) -> Option<HeaderValue> {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        HeaderValue::from_str(&format!("Basic {}", credentials)).ok()
    }
}

// The password never appears in debug output or data set snapshots.
impl fmt::Debug for BasicHttpAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicHttpAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Auth for BasicHttpAuth {
    fn authenticate(&self, request: &mut Request<Body>) {
        match self.header_value() {
            Some(value) => {
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            None => log::warn!(
                "Basic auth credentials for user '{}' are not a valid header value",
                self.username
            ),
        }
    }
}
