// tests/common.rs

// Every test binary compiles this module; not all of them use every helper.
#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use httpsmoke::errors::Result;
use httpsmoke::{AxumKernel, Container, Kernel, RouteInfo, RouteTable};
use serde::Deserialize;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// The id of the one order that exists in the sample shop.
pub const EXISTING_ORDER_ID: u32 = 17;

/// Fixture value stored in the kernel container, read by deferred setups.
#[derive(Debug, Clone, Copy)]
pub struct ExistingOrderId(pub u32);

#[derive(Deserialize)]
struct Pagination {
    page: Option<u32>,
}

async fn product_detail(Path(id): Path<u32>) -> StatusCode {
    if id == 999 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn product_list(Query(pagination): Query<Pagination>) -> StatusCode {
    match pagination.page {
        Some(page) if page > 10 => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    }
}

async fn cart_add(headers: HeaderMap, body: String) -> StatusCode {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
    if !is_form {
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    } else if body.contains("product=") {
        StatusCode::CREATED
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

async fn admin(headers: HeaderMap) -> StatusCode {
    // admin:admin123
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value == "Basic YWRtaW46YWRtaW4xMjM=" => StatusCode::OK,
        Some(_) => StatusCode::FORBIDDEN,
        None => StatusCode::UNAUTHORIZED,
    }
}

async fn order_detail(Path(id): Path<u32>) -> StatusCode {
    if id == EXISTING_ORDER_ID {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

/// A small shop: six named routes, registered in a fixed order.
///
/// Without customization `admin`, `cart_add` and `order_detail` fail.
pub fn shop() -> RouteTable {
    RouteTable::new()
        .route(
            RouteInfo::new("homepage", "/").methods([Method::GET]),
            get(|| async { "welcome" }),
        )
        .route(
            RouteInfo::new("product_detail", "/product/:id").methods([Method::GET]),
            get(product_detail),
        )
        .route(
            RouteInfo::new("product_list", "/products")
                .methods([Method::GET])
                .optional_parameter("page"),
            get(product_list),
        )
        .route(
            RouteInfo::new("cart_add", "/cart/add").methods([Method::POST]),
            post(cart_add),
        )
        .route(
            RouteInfo::new("admin", "/admin").methods([Method::GET]),
            get(admin),
        )
        .route(
            RouteInfo::new("order_detail", "/order/:id").methods([Method::GET]),
            get(order_detail),
        )
}

/// The kernel for [`shop`], with the order fixture in its container.
pub fn shop_kernel(table: &RouteTable) -> AxumKernel {
    AxumKernel::new(table.router()).provide(ExistingOrderId(EXISTING_ORDER_ID))
}

/// Records every request it dispatches before handing it to the wrapped kernel.
pub struct RecordingKernel {
    inner: AxumKernel,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl RecordingKernel {
    pub fn new(inner: AxumKernel) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `METHOD uri` of every dispatched request, in dispatch order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Kernel for RecordingKernel {
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Result<Response>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push(format!("{} {}", request.method(), request.uri()));
        self.inner.handle(request)
    }

    fn container(&self) -> &Container {
        self.inner.container()
    }
}
