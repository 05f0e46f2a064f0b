//! Defines `RouteInfo`, the read-only description of one discovered route.
//!
//! A `RouteInfo` is assembled once, when the route is registered with a router
//! adapter, and is only ever read afterwards by route configs, generators and
//! customization callbacks.

use axum::http::Method;
use once_cell::sync::Lazy;
use regex::Regex;

// Axum path syntax: `:name` captures one segment, `*name` the remainder.
pub(crate) static PATH_PARAMETER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([:*])([A-Za-z_][A-Za-z0-9_]*)$").unwrap());

/// Where a declared parameter ends up in the generated URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    /// A `:name` path segment.
    Path,
    /// A `*name` catch-all path segment.
    Wildcard,
    /// A query-string parameter.
    Query,
}

/// One declared route parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParameter {
    name: String,
    required: bool,
    location: ParameterLocation,
    default: Option<String>,
}

impl RouteParameter {
    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a value must be supplied for the route to resolve.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Where the parameter is placed in the URI.
    pub fn location(&self) -> ParameterLocation {
        self.location
    }

    /// The declared default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Metadata of a single route: name, path pattern, parameters and accepted methods.
///
/// # Examples
///
/// ```
/// use httpsmoke::RouteInfo;
/// use axum::http::Method;
///
/// let info = RouteInfo::new("product_detail", "/product/:id")
///     .methods([Method::GET])
///     .optional_parameter("ref");
///
/// assert_eq!(info.parameter_names(), vec!["id", "ref"]);
/// assert!(info.is_parameter_required("id"));
/// assert!(!info.is_parameter_required("ref"));
/// assert!(!info.is_http_method_allowed(&Method::POST));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    name: String,
    path: String,
    parameters: Vec<RouteParameter>,
    methods: Vec<Method>,
}

impl RouteInfo {
    /// Creates a `RouteInfo` from a route name and an axum path pattern.
    ///
    /// Every `:param` and `*param` segment is declared as a required parameter,
    /// in the order it appears in the path.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let parameters = path
            .split('/')
            .filter_map(|segment| PATH_PARAMETER_RE.captures(segment))
            .map(|caps| RouteParameter {
                name: caps[2].to_string(),
                required: true,
                location: if &caps[1] == "*" {
                    ParameterLocation::Wildcard
                } else {
                    ParameterLocation::Path
                },
                default: None,
            })
            .collect();

        Self {
            name: name.into(),
            path,
            parameters,
            methods: Vec::new(),
        }
    }

    /// Restricts the HTTP methods the route accepts. An empty set means any method.
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        for method in methods {
            if !self.methods.contains(&method) {
                self.methods.push(method);
            }
        }
        self
    }

    /// Declares an optional query-string parameter without a default value.
    pub fn optional_parameter(self, name: impl Into<String>) -> Self {
        self.push_query_parameter(name.into(), None)
    }

    /// Declares an optional query-string parameter with a default value.
    pub fn optional_parameter_with_default(
        self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        self.push_query_parameter(name.into(), Some(default.into()))
    }

    /// Sets the default value of an already declared parameter.
    ///
    /// Unknown names are ignored; the value is used instead of the placeholder
    /// when the default data set is pre-filled.
    pub fn parameter_default(mut self, name: &str, default: impl Into<String>) -> Self {
        if let Some(parameter) = self.parameters.iter_mut().find(|p| p.name == name) {
            parameter.default = Some(default.into());
        }
        self
    }

    fn push_query_parameter(mut self, name: String, default: Option<String>) -> Self {
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.default = default.or(existing.default.take()),
            None => self.parameters.push(RouteParameter {
                name,
                required: false,
                location: ParameterLocation::Query,
                default,
            }),
        }
        self
    }

    /// The unique route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path pattern the route was registered with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All declared parameters, path parameters first.
    pub fn parameters(&self) -> &[RouteParameter] {
        &self.parameters
    }

    /// Looks up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&RouteParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of all declared parameters, in declaration order.
    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Whether the route declares a parameter with this name.
    pub fn is_parameter_declared(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    /// Whether the named parameter is declared and required.
    pub fn is_parameter_required(&self, name: &str) -> bool {
        self.parameter(name).is_some_and(RouteParameter::is_required)
    }

    /// The accepted methods; empty when the route accepts any method.
    pub fn allowed_methods(&self) -> &[Method] {
        &self.methods
    }

    /// Whether the route accepts the given method.
    pub fn is_http_method_allowed(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }
}
