//! `httpsmoke` is a smoke testing harness for axum applications.
//!
//! It asks the application's router for every named route, turns each route
//! into one or more request data sets, dispatches them in-process and asserts
//! that every response carries the expected status code. Without any
//! customization, every route is requested once with `GET` and must answer
//! `200`; test authors then adjust single routes, groups of routes matched by
//! name, or all of them at once.
//!
//! The pipeline has four stages:
//! 1.  **Discover**: a [`RouterAdapter`] lists every route as a [`RouteInfo`].
//! 2.  **Customize**: callbacks receive a [`RouteConfigCustomizer`] and change
//!     expected codes, parameters, auth and bodies, or add parameter variants
//!     and extra data sets.
//! 3.  **Generate**: each route's [`RequestDataSetGenerator`] expands its config
//!     into uniquely named [`RequestDataSet`]s.
//! 4.  **Dispatch**: [`HttpSmokeTest`] runs deferred setups, builds a request per
//!     data set, hands it to the [`Kernel`] and compares the status code.
//!
//! # Example
//!
//! ```
//! use httpsmoke::prelude::*;
//! use axum::{extract::Path, http::StatusCode, routing::get};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> httpsmoke::errors::Result<()> {
//! async fn product(Path(id): Path<u32>) -> StatusCode {
//!     if id == 999 {
//!         StatusCode::NOT_FOUND
//!     } else {
//!         StatusCode::OK
//!     }
//! }
//!
//! let table: RouteTable = RouteTable::new()
//!     .route(RouteInfo::new("homepage", "/"), get(|| async { "welcome" }))
//!     .route(RouteInfo::new("product_detail", "/product/:id"), get(product));
//! let kernel = AxumKernel::new(table.router());
//!
//! let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
//! suite.customize_route_configs(|customizer| {
//!     customizer.customize_by_route_name(
//!         "product_detail",
//!         |config: &mut RouteConfig, _: &RouteInfo| {
//!             config.add_extra("missing", |missing| {
//!                 missing.set_parameter("id", "999");
//!                 missing.set_expected_status_code(404);
//!             });
//!         },
//!     )
//! });
//!
//! let names: Vec<String> = suite.data_provider()?.into_keys().collect();
//! assert_eq!(names, ["homepage", "product_detail", "product_detail [missing]"]);
//!
//! let report = suite.run().await?.into_result()?;
//! assert_eq!(report.passed().count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod customizer;
pub mod data_set;
pub mod errors;
pub mod generator;
pub mod kernel;
pub mod logging;
pub mod prelude;
pub mod route_config;
pub mod route_info;
pub mod router;
pub mod smoke;

pub use auth::{Auth, BasicHttpAuth, NoAuth};
pub use config::{ConfigBuilder, SmokeConfig};
pub use customizer::{RouteConfigCustomizer, RouteCustomizer};
pub use data_set::{deferred, Container, DeferredSetup, RequestDataSet, RequestDataSetConfig};
pub use generator::RequestDataSetGenerator;
pub use kernel::{AxumKernel, Kernel};
pub use route_config::RouteConfig;
pub use route_info::{ParameterLocation, RouteInfo, RouteParameter};
pub use router::{RouteTable, RouterAdapter};
pub use smoke::{HttpSmokeTest, SmokeReport, SmokeResult, TestOutcome};
