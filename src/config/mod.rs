//! Defines the `SmokeConfig` struct that controls how data sets are generated
//! and how requests are built.
//!
//! Build one with [`ConfigBuilder`], either from explicit values or from the
//! `HTTP_SMOKE_*` environment variables.

use crate::constants::{DEFAULT_BASE_URI, DEFAULT_PLACEHOLDER};
use once_cell::sync::Lazy;
use url::Url;

pub use builder::ConfigBuilder;
mod builder;

pub(crate) static DEFAULT_BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse(DEFAULT_BASE_URI).unwrap());

/// Harness-wide settings shared by every data set of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    /// Scheme and authority every generated relative URI is joined with.
    pub base_uri: Url,
    /// Value pre-filled for every declared route parameter without a default.
    pub placeholder: String,
    /// `Content-Type` header sent with POST requests. `None` sends no header.
    pub post_content_type: Option<String>,
    /// Stop `run` at the first failing data set.
    pub fail_fast: bool,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URL.clone(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            post_content_type: None,
            fail_fast: false,
        }
    }
}
