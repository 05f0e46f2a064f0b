//! The dispatch boundary: request in, response out.

use crate::data_set::Container;
use crate::errors::{Error, Result};
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use std::future::Future;
use tower::util::ServiceExt;

/// Handles a fully built request and exposes the application's runtime container.
pub trait Kernel {
    /// Dispatches the request into the application.
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Result<Response>> + Send;

    /// The container passed to deferred setups.
    fn container(&self) -> &Container;
}

/// A `Kernel` backed by an axum `Router`, dispatched in-process with `oneshot`.
///
/// # Examples
///
/// ```
/// use httpsmoke::{AxumKernel, Kernel};
/// use axum::{routing::get, Router};
///
/// #[derive(Clone)]
/// struct DatabaseUrl(&'static str);
///
/// let router = Router::new().route("/", get(|| async { "ok" }));
/// let kernel = AxumKernel::new(router).provide(DatabaseUrl("sqlite::memory:"));
///
/// assert_eq!(kernel.container().get::<DatabaseUrl>().map(|u| u.0), Some("sqlite::memory:"));
/// ```
#[derive(Clone, Debug)]
pub struct AxumKernel {
    router: Router,
    container: Container,
}

impl AxumKernel {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            container: Container::new(),
        }
    }

    /// Replaces the runtime container.
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Adds one value to the runtime container.
    pub fn provide<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.container.insert(value);
        self
    }
}

impl Kernel for AxumKernel {
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Result<Response>> + Send {
        let router = self.router.clone();
        let uri = request.uri().to_string();
        async move {
            router
                .oneshot(request)
                .await
                .map_err(|infallible| Error::Dispatch {
                    uri,
                    reason: infallible.to_string(),
                })
        }
    }

    fn container(&self) -> &Container {
        &self.container
    }
}
