//! The `httpsmoke` prelude for writing smoke test suites.
//!
//! Re-exports the types and traits a suite needs: route discovery, data set
//! customization, the harness itself and the configuration builder.
//!
//! # Example
//!
//! ```
//! use httpsmoke::prelude::*;
//! # fn main() -> Result<()> {
//!
//! let info = RouteInfo::new("product_detail", "/product/:id");
//! let mut config = RouteConfig::new(&info, "1");
//! config.add_parameter_variant("id", [999]);
//! config.default_data_set().add_debug_note("Product 1 is seeded by the fixtures.");
//!
//! let smoke_config = ConfigBuilder::new().base_uri("http://shop.test").build()?;
//! assert_eq!(smoke_config.placeholder, "1");
//! # Ok(())
//! # }
//! ```

pub use crate::auth::{Auth, BasicHttpAuth, NoAuth};
pub use crate::config::{ConfigBuilder, SmokeConfig};
pub use crate::customizer::{RouteConfigCustomizer, RouteCustomizer};
pub use crate::data_set::{deferred, Container, DeferredSetup, RequestDataSet, RequestDataSetConfig};
pub use crate::errors::{Error, Result};
pub use crate::generator::RequestDataSetGenerator;
pub use crate::kernel::{AxumKernel, Kernel};
pub use crate::route_config::RouteConfig;
pub use crate::route_info::{ParameterLocation, RouteInfo, RouteParameter};
pub use crate::router::{RouteTable, RouterAdapter};
pub use crate::smoke::{HttpSmokeTest, SmokeReport, SmokeResult, TestOutcome};
