//! The router boundary: route discovery and URI generation.
//!
//! `RouterAdapter` is what the harness consumes. `RouteTable` is the bundled
//! adapter for axum applications; it records each route's metadata while the
//! `Router` is being built, because a finished axum `Router` cannot be listed.

use crate::data_set::RequestDataSet;
use crate::errors::Result;
use crate::route_info::RouteInfo;

mod table;
mod uri;

pub use table::RouteTable;
pub use uri::generate_uri;

/// Supplies route metadata and turns data sets into concrete URIs.
pub trait RouterAdapter {
    /// Every route of the application, in a stable order.
    fn all_route_info(&self) -> Vec<RouteInfo>;

    /// Builds the path-and-query URI (e.g. `/product/1?ref=home`) for a data set.
    ///
    /// Path parameters are substituted, every other parameter goes into the
    /// query string.
    fn generate_uri(&self, data_set: &RequestDataSet) -> Result<String>;
}
