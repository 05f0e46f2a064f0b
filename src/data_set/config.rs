//! The customization surface of a `RequestDataSet`.

use super::setup::DeferredSetup;
use crate::auth::Auth;
use std::sync::Arc;

/// Mutators a customization callback may use on a data set.
///
/// Structural operations (cloning, merging, variant naming, skipping) live on
/// `RequestDataSet` and `RouteConfig` and are not reachable through this trait.
/// The trait is object safe; callbacks receive `&mut dyn RequestDataSetConfig`.
pub trait RequestDataSetConfig {
    /// Authentication strategy applied to the request.
    fn set_auth(&mut self, auth: Arc<dyn Auth>);

    /// Status code the response must have.
    fn set_expected_status_code(&mut self, code: u16);

    /// Sets (or overwrites) a route parameter value.
    fn set_parameter(&mut self, name: &str, value: &str);

    /// Appends a note shown when the data set is skipped or fails.
    fn add_debug_note(&mut self, note: &str);

    /// Appends a callback run right before the request is built.
    ///
    /// Useful for values that can only be computed with access to the same
    /// runtime container the application uses (e.g. an id looked up in a store).
    fn add_deferred_setup(&mut self, setup: Arc<dyn DeferredSetup>);

    /// Makes the request a POST with this literal body. An empty body means GET.
    fn set_post_request_body(&mut self, body: &str);
}
