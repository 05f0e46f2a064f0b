// src/smoke/request.rs

use crate::config::SmokeConfig;
use crate::data_set::RequestDataSet;
use crate::errors::{Error, Result};
use axum::body::Body;
use axum::http::{header, Method, Request};

/// Joins the relative URI with the base URI and builds the request.
pub(super) fn build(
    config: &SmokeConfig,
    relative_uri: &str,
    data_set: &RequestDataSet,
) -> Result<Request<Body>> {
    let uri = config
        .base_uri
        .join(relative_uri)
        .map_err(|e| Error::InvalidUri {
            uri: relative_uri.to_string(),
            reason: e.to_string(),
        })?;

    let body = data_set.post_request_body();
    let builder = Request::builder().uri(uri.as_str());
    let built = if body.is_empty() {
        builder.method(Method::GET).body(Body::empty())
    } else {
        let mut builder = builder.method(Method::POST);
        if let Some(content_type) = &config.post_content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type.as_str());
        }
        builder.body(Body::from(body.to_string()))
    };

    let mut request = built.map_err(|e| Error::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;
    data_set.auth().authenticate(&mut request);
    Ok(request)
}
