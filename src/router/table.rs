// src/router/table.rs

use super::{uri, RouterAdapter};
use crate::data_set::RequestDataSet;
use crate::errors::{Error, Result};
use crate::route_info::RouteInfo;
use axum::handler::Handler;
use axum::routing::MethodRouter;
use axum::Router;

/// An axum `Router` that remembers the name and metadata of every route.
///
/// # Examples
///
/// ```
/// use httpsmoke::{RouteInfo, RouteTable, RouterAdapter};
/// use axum::{http::Method, routing::get};
///
/// let table: RouteTable = RouteTable::new()
///     .route(RouteInfo::new("homepage", "/").methods([Method::GET]), get(|| async { "hi" }))
///     .route(
///         RouteInfo::new("product_detail", "/product/:id").methods([Method::GET]),
///         get(|| async { "product" }),
///     );
///
/// let names: Vec<String> = table
///     .all_route_info()
///     .iter()
///     .map(|info| info.name().to_string())
///     .collect();
/// assert_eq!(names, vec!["homepage", "product_detail"]);
/// ```
pub struct RouteTable<S = ()> {
    routes: Vec<RouteInfo>,
    router: Router<S>,
}

impl<S> RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            router: Router::new(),
        }
    }

    /// Registers a route. A second route with an already used name, or one
    /// whose path and methods overlap a registered route, is ignored with a
    /// warning; use `try_route` to get an error instead.
    ///
    /// Overlap is judged on `RouteInfo` alone: identical paths whose method
    /// lists share a method, or where either list is empty. Distinct patterns
    /// that axum still considers conflicting (`/:id` next to `/:slug`) are not
    /// detected and panic inside axum, as `Router::route` does.
    pub fn route(self, info: RouteInfo, handler: MethodRouter<S>) -> Self {
        if self.route_info(info.name()).is_some() {
            log::warn!(
                "Route name '{}' is already registered, ignoring path '{}'",
                info.name(),
                info.path()
            );
            return self;
        }
        if let Some(existing) = self.overlapping_route(&info) {
            log::warn!(
                "Route '{}' overlaps route '{}' on path '{}', ignoring it",
                info.name(),
                existing.name(),
                info.path()
            );
            return self;
        }
        self.insert(info, handler)
    }

    /// Registers a route, failing if the name is already taken or the path
    /// and methods overlap a registered route.
    pub fn try_route(self, info: RouteInfo, handler: MethodRouter<S>) -> Result<Self> {
        if self.route_info(info.name()).is_some() {
            return Err(Error::DuplicateRouteName {
                name: info.name().to_string(),
            });
        }
        if let Some(existing) = self.overlapping_route(&info) {
            return Err(Error::OverlappingRoute {
                name: info.name().to_string(),
                existing: existing.name().to_string(),
                path: info.path().to_string(),
            });
        }
        Ok(self.insert(info, handler))
    }

    // An empty method list means any method.
    fn overlapping_route(&self, info: &RouteInfo) -> Option<&RouteInfo> {
        self.routes.iter().find(|existing| {
            existing.path() == info.path()
                && (existing.allowed_methods().is_empty()
                    || info.allowed_methods().is_empty()
                    || info
                        .allowed_methods()
                        .iter()
                        .any(|method| existing.is_http_method_allowed(method)))
        })
    }

    fn insert(mut self, info: RouteInfo, handler: MethodRouter<S>) -> Self {
        log::debug!("Registering route '{}' at '{}'", info.name(), info.path());
        self.router = self.router.route(info.path(), handler);
        self.routes.push(info);
        self
    }

    /// Sets the handler for requests that match no route. The fallback is not
    /// a named route and is never smoke tested.
    pub fn with_fallback<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.router = self.router.fallback(handler);
        self
    }

    /// Provides the router state, as `Router::with_state` does.
    pub fn with_state<S2>(self, state: S) -> RouteTable<S2> {
        RouteTable {
            routes: self.routes,
            router: self.router.with_state(state),
        }
    }

    pub fn route_info(&self, name: &str) -> Option<&RouteInfo> {
        self.routes.iter().find(|info| info.name() == name)
    }
}

impl RouteTable<()> {
    /// A clone of the built router, ready to be served or dispatched into.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

impl<S> Default for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RouterAdapter for RouteTable<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn all_route_info(&self) -> Vec<RouteInfo> {
        self.routes.clone()
    }

    fn generate_uri(&self, data_set: &RequestDataSet) -> Result<String> {
        let info = self
            .route_info(data_set.route_name())
            .ok_or_else(|| Error::RouteNameNotFound {
                name: data_set.route_name().to_string(),
            })?;
        uri::generate_uri(info, data_set)
    }
}
