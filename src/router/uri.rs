// src/router/uri.rs

use crate::config::DEFAULT_BASE_URL;
use crate::constants::DEFAULT_BASE_URI;
use crate::data_set::RequestDataSet;
use crate::errors::{Error, Result};
use crate::route_info::{ParameterLocation, RouteInfo, PATH_PARAMETER_RE};
use url::Position;

/// Resolves a data set against its route's path pattern.
///
/// Path segments are percent-encoded one by one, catch-all values keep their
/// `/` separators, and the remaining parameters are appended as a query string
/// in key order. The result is a path-and-query string starting with `/`.
///
/// # Examples
///
/// ```
/// use httpsmoke::prelude::*;
/// use httpsmoke::router::generate_uri;
///
/// let info = RouteInfo::new("product_detail", "/product/:id");
/// let mut data_set = RequestDataSet::new("product_detail");
/// data_set.set_parameter("id", "42");
/// data_set.set_parameter("ref", "home page");
///
/// assert_eq!(generate_uri(&info, &data_set).unwrap(), "/product/42?ref=home+page");
/// ```
pub fn generate_uri(route_info: &RouteInfo, data_set: &RequestDataSet) -> Result<String> {
    let mut url = DEFAULT_BASE_URL.clone();

    {
        let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidUri {
            uri: DEFAULT_BASE_URI.to_string(),
            reason: "cannot be a base".to_string(),
        })?;
        segments.clear();

        for segment in route_info.path().trim_start_matches('/').split('/') {
            match PATH_PARAMETER_RE.captures(segment) {
                Some(caps) => {
                    let name = &caps[2];
                    let value = data_set.parameter(name).ok_or_else(|| {
                        Error::MissingRouteParameter {
                            route: route_info.name().to_string(),
                            parameter: name.to_string(),
                        }
                    })?;
                    if &caps[1] == "*" {
                        let parts: Vec<&str> =
                            value.strip_prefix('/').unwrap_or(value).split('/').collect();
                        for part in &parts {
                            check_segment(route_info, name, value, part)?;
                        }
                        segments.extend(parts);
                    } else {
                        check_segment(route_info, name, value, value)?;
                        segments.push(value);
                    }
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }

    let query: Vec<(&String, &String)> = data_set
        .parameters()
        .iter()
        .filter(|(name, _)| {
            !matches!(
                route_info.parameter(name).map(|p| p.location()),
                Some(ParameterLocation::Path | ParameterLocation::Wildcard)
            )
        })
        .collect();

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    Ok(url[Position::BeforePath..].to_string())
}

// `PathSegmentsMut` drops `.` and `..` and folds empty segments, which would
// resolve the data set against a different route.
fn check_segment(route_info: &RouteInfo, name: &str, value: &str, segment: &str) -> Result<()> {
    let reason = match segment {
        "" => "is empty",
        "." | ".." => "is a dot segment",
        _ => return Ok(()),
    };
    Err(Error::InvalidUri {
        uri: value.to_string(),
        reason: format!(
            "path segment for parameter \"{}\" of route \"{}\" {}",
            name,
            route_info.name(),
            reason
        ),
    })
}
