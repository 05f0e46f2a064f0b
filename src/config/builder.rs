// src/config/builder.rs

use super::SmokeConfig;
use crate::constants::{DEFAULT_BASE_URI, DEFAULT_PLACEHOLDER, ENV_PREFIX};
use crate::errors::{Error, Result};
use axum::http::HeaderValue;
use url::Url;

/// A fluent builder for [`SmokeConfig`].
///
/// Unset options fall back to their defaults when `build` is called. Values
/// are only validated in `build`, so setters never fail.
///
/// # Examples
///
/// ```
/// use httpsmoke::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .base_uri("https://shop.test")
///     .placeholder("42")
///     .post_content_type("application/json")
///     .build()?;
///
/// assert_eq!(config.base_uri.host_str(), Some("shop.test"));
/// assert_eq!(config.placeholder, "42");
/// # Ok::<(), httpsmoke::errors::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    base_uri: Option<String>,
    placeholder: Option<String>,
    post_content_type: Option<String>,
    fail_fast: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the `HTTP_SMOKE_*` environment variables.
    ///
    /// Recognised variables are `HTTP_SMOKE_BASE_URI`, `HTTP_SMOKE_PLACEHOLDER`,
    /// `HTTP_SMOKE_POST_CONTENT_TYPE` and `HTTP_SMOKE_FAIL_FAST`. Setters called
    /// afterwards override them.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        let mut builder = Self::new();
        if let Some(base_uri) = var("BASE_URI") {
            log::debug!("Base URI from environment: {}", base_uri);
            builder = builder.base_uri(base_uri);
        }
        if let Some(placeholder) = var("PLACEHOLDER") {
            builder = builder.placeholder(placeholder);
        }
        if let Some(content_type) = var("POST_CONTENT_TYPE").filter(|v| !v.trim().is_empty()) {
            builder = builder.post_content_type(content_type);
        }
        if let Some(fail_fast) = var("FAIL_FAST") {
            builder = builder.fail_fast(parse_bool(&fail_fast)?);
        }
        Ok(builder)
    }

    /// Scheme and authority used for every request, e.g. `https://shop.test`.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn post_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.post_content_type = Some(content_type.into());
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    /// Validates the options and builds the final `SmokeConfig`.
    pub fn build(self) -> Result<SmokeConfig> {
        let raw_base = self.base_uri.unwrap_or_else(|| DEFAULT_BASE_URI.to_string());
        let base_uri = Url::parse(raw_base.trim()).map_err(|e| Error::InvalidUri {
            uri: raw_base.clone(),
            reason: e.to_string(),
        })?;
        if base_uri.cannot_be_a_base() || base_uri.host_str().is_none() {
            return Err(Error::ConfigError(format!(
                "base URI '{}' must be an absolute URL with a host",
                raw_base
            )));
        }
        if base_uri.query().is_some() || base_uri.fragment().is_some() {
            return Err(Error::ConfigError(format!(
                "base URI '{}' must not carry a query or fragment",
                raw_base
            )));
        }
        // Route URIs are absolute paths, so joining them replaces any base path.
        if base_uri.path() != "/" {
            return Err(Error::ConfigError(format!(
                "base URI '{}' must not carry a path",
                raw_base
            )));
        }

        let placeholder = self
            .placeholder
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
        if placeholder.is_empty() {
            return Err(Error::ConfigError(
                "placeholder must not be empty".to_string(),
            ));
        }

        if let Some(content_type) = &self.post_content_type {
            HeaderValue::from_str(content_type).map_err(|_| {
                Error::ConfigError(format!(
                    "post content type '{}' is not a valid header value",
                    content_type
                ))
            })?;
        }

        Ok(SmokeConfig {
            base_uri,
            placeholder,
            post_content_type: self.post_content_type,
            fail_fast: self.fail_fast.unwrap_or(false),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::ConfigError(format!(
            "{}FAIL_FAST must be a boolean, got '{}'",
            ENV_PREFIX, other
        ))),
    }
}
