//! Defines `RequestDataSet`, everything needed to build and evaluate one request.
//!
//! A data set is created by a `RouteConfig` (the route's default), cloned into
//! parameter variants and extras by the generator, mutated by deferred setups,
//! and finally consumed by the request builder.

use crate::auth::{Auth, NoAuth};
use crate::constants::DEFAULT_EXPECTED_STATUS_CODE;
use crate::errors::{Error, Result};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

mod config;
mod setup;

pub use config::RequestDataSetConfig;
pub use setup::{deferred, Container, DeferredSetup};

static NO_AUTH: NoAuth = NoAuth;

/// One concrete request description with its expected outcome.
///
/// Fields that were never set explicitly fall back to defaults when read:
/// no auth means `NoAuth`, no expected status means `200`.
#[derive(Clone)]
pub struct RequestDataSet {
    route_name: String,
    variant: Option<String>,
    skipped: bool,
    auth: Option<Arc<dyn Auth>>,
    expected_status_code: Option<u16>,
    parameters: BTreeMap<String, String>,
    debug_notes: Vec<String>,
    deferred_setups: Vec<Arc<dyn DeferredSetup>>,
    post_request_body: String,
}

impl RequestDataSet {
    /// Creates an empty data set for the given route.
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            variant: None,
            skipped: false,
            auth: None,
            expected_status_code: None,
            parameters: BTreeMap::new(),
            debug_notes: Vec::new(),
            deferred_setups: Vec::new(),
            post_request_body: String::new(),
        }
    }

    /// The route this data set targets. Used to resolve the URI.
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// The variant label, `None` for a route's default data set.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    pub(crate) fn set_variant(&mut self, variant: impl Into<String>) {
        self.variant = Some(variant.into());
    }

    /// The unique name used to key and report this data set.
    ///
    /// `product_detail` for a default, `product_detail [id=999]` for a variant.
    pub fn name(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} [{}]", self.route_name, variant),
            None => self.route_name.clone(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    /// Excludes the data set from execution. It is still generated and reported.
    pub fn skip(&mut self) {
        self.skipped = true;
    }

    /// The auth strategy to apply, `NoAuth` when none was set.
    pub fn auth(&self) -> &dyn Auth {
        match &self.auth {
            Some(auth) => auth.as_ref(),
            None => &NO_AUTH,
        }
    }

    /// The expected status code, `200` when none was set.
    pub fn expected_status_code(&self) -> u16 {
        self.expected_status_code.unwrap_or(DEFAULT_EXPECTED_STATUS_CODE)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn debug_notes(&self) -> &[String] {
        &self.debug_notes
    }

    /// Number of deferred setups still waiting to run.
    pub fn pending_deferred_setups(&self) -> usize {
        self.deferred_setups.len()
    }

    pub fn post_request_body(&self) -> &str {
        &self.post_request_body
    }

    /// Runs every stored deferred setup, in insertion order.
    ///
    /// The setups are consumed: calling this again runs nothing, unless a setup
    /// registered new ones while running.
    pub fn execute_deferred_setups(&mut self, container: &Container) -> Result<()> {
        let setups = std::mem::take(&mut self.deferred_setups);
        for setup in &setups {
            setup
                .run(self, container)
                .map_err(|source| Error::DeferredSetup {
                    name: self.name(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Merges the explicitly set values of `other` into this data set.
    ///
    /// Values left at their defaults on `other` have no effect: auth and expected
    /// status are replaced only when set, parameters are overwritten key by key,
    /// notes and setups are appended, and the body is replaced only when non-empty.
    /// Route name, variant and skip flag are never taken from `other`.
    pub fn merge_extra_values_from(&mut self, other: &RequestDataSet) {
        if let Some(auth) = &other.auth {
            self.auth = Some(Arc::clone(auth));
        }
        if let Some(code) = other.expected_status_code {
            self.expected_status_code = Some(code);
        }
        for (name, value) in &other.parameters {
            self.parameters.insert(name.clone(), value.clone());
        }
        self.debug_notes.extend(other.debug_notes.iter().cloned());
        self.deferred_setups
            .extend(other.deferred_setups.iter().map(Arc::clone));
        if !other.post_request_body.is_empty() {
            self.post_request_body = other.post_request_body.clone();
        }
    }
}

impl RequestDataSetConfig for RequestDataSet {
    fn set_auth(&mut self, auth: Arc<dyn Auth>) {
        self.auth = Some(auth);
    }

    fn set_expected_status_code(&mut self, code: u16) {
        self.expected_status_code = Some(code);
    }

    fn set_parameter(&mut self, name: &str, value: &str) {
        self.parameters.insert(name.to_string(), value.to_string());
    }

    fn add_debug_note(&mut self, note: &str) {
        self.debug_notes.push(note.to_string());
    }

    fn add_deferred_setup(&mut self, setup: Arc<dyn DeferredSetup>) {
        self.deferred_setups.push(setup);
    }

    fn set_post_request_body(&mut self, body: &str) {
        self.post_request_body = body.to_string();
    }
}

impl fmt::Debug for RequestDataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDataSet")
            .field("route_name", &self.route_name)
            .field("variant", &self.variant)
            .field("skipped", &self.skipped)
            .field("auth", &self.auth)
            .field("expected_status_code", &self.expected_status_code)
            .field("parameters", &self.parameters)
            .field("debug_notes", &self.debug_notes)
            .field("deferred_setups", &self.deferred_setups.len())
            .field("post_request_body", &self.post_request_body)
            .finish()
    }
}

// Snapshot of the resolved values; callbacks are represented by their count.
impl Serialize for RequestDataSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestDataSet", 9)?;
        state.serialize_field("name", &self.name())?;
        state.serialize_field("route_name", &self.route_name)?;
        state.serialize_field("skipped", &self.skipped)?;
        state.serialize_field("auth", &format!("{:?}", self.auth()))?;
        state.serialize_field("expected_status_code", &self.expected_status_code())?;
        state.serialize_field("parameters", &self.parameters)?;
        state.serialize_field("debug_notes", &self.debug_notes)?;
        state.serialize_field("deferred_setups", &self.deferred_setups.len())?;
        state.serialize_field("post_request_body", &self.post_request_body)?;
        state.end()
    }
}
