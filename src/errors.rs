//! Defines the error types for the smoke-testing harness.
//!
//! Every variant except `Dispatch` and `SmokeFailures` is a configuration error:
//! it means the test suite itself is broken (stale route names, mistyped
//! parameters, colliding variant names) and it is raised before any request
//! reaches the application.

use thiserror::Error;

/// Errors produced while discovering, customizing, generating or running data sets.
#[derive(Error, Debug)]
pub enum Error {
    // --- Customization Errors ---
    /// A customization targeted a route name that the router does not expose.
    #[error("Route \"{name}\" not found. Did you rename or remove it?")]
    RouteNameNotFound {
        /// The route name that was requested.
        name: String,
    },

    /// Two routes were registered under the same name.
    #[error("Route \"{name}\" is already registered.")]
    DuplicateRouteName {
        /// The duplicated route name.
        name: String,
    },

    /// A route was registered on a path and method already served by another route.
    #[error("Route \"{name}\" overlaps route \"{existing}\" on path '{path}'.")]
    OverlappingRoute {
        /// The rejected route name.
        name: String,
        /// The registered route it collides with.
        existing: String,
        path: String,
    },

    /// A route name pattern could not be compiled.
    #[error("Invalid route name pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written by the test author.
        pattern: String,
        /// The underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    // --- Generation Errors ---
    /// A parameter variant was requested for a parameter the route does not declare.
    #[error("Route \"{route}\" does not declare parameter \"{parameter}\" used in a parameter variant.")]
    UnknownParameter {
        /// The route the variant was registered on.
        route: String,
        /// The undeclared parameter name.
        parameter: String,
    },

    /// A parameter variant was registered without any values.
    #[error("Parameter variant \"{parameter}\" of route \"{route}\" has no values.")]
    EmptyParameterVariant {
        /// The route the variant was registered on.
        route: String,
        /// The parameter name of the empty axis.
        parameter: String,
    },

    /// Two generated data sets ended up with the same name.
    #[error("Generated data set name \"{name}\" is not unique.")]
    DuplicateDataSetName {
        /// The colliding data set name.
        name: String,
    },

    // --- Request Building Errors ---
    /// A path parameter has no value in the data set.
    #[error("Missing value for path parameter \"{parameter}\" of route \"{route}\".")]
    MissingRouteParameter {
        /// The route being resolved.
        route: String,
        /// The path parameter without a value.
        parameter: String,
    },

    /// A URI could not be built or parsed.
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The offending URI (or URI fragment).
        uri: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A deferred setup callback failed.
    #[error("Deferred setup for data set \"{name}\" failed: {source}")]
    DeferredSetup {
        /// The name of the data set whose setup failed.
        name: String,
        /// The error returned by the callback.
        #[source]
        source: anyhow::Error,
    },

    // --- Configuration Errors ---
    /// Invalid harness configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    // --- Execution Errors ---
    /// The kernel could not produce a response.
    #[error("Dispatching request to '{uri}' failed: {reason}")]
    Dispatch {
        /// The request URI.
        uri: String,
        /// Reason reported by the kernel.
        reason: String,
    },

    /// One or more data sets did not receive the expected status code.
    #[error("{count} smoke test(s) failed:\n{summary}")]
    SmokeFailures {
        /// Number of failed data sets.
        count: usize,
        /// The failure messages, one block per data set.
        summary: String,
    },
}

/// A specialized `Result` type for harness operations.
pub type Result<T> = std::result::Result<T, Error>;
