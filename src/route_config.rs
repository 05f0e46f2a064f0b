//! Per-route configuration: one default data set plus registered variants.

use crate::data_set::{RequestDataSet, RequestDataSetConfig};
use crate::route_info::RouteInfo;

/// A cartesian axis: one generated data set per value of `parameter`.
#[derive(Debug, Clone)]
pub(crate) struct ParameterVariant {
    pub(crate) parameter: String,
    pub(crate) values: Vec<String>,
}

/// Accumulates the request shapes to test for a single route.
///
/// The default data set is created up front with every declared parameter
/// filled in; parameter variants and extras are only registered here and are
/// expanded against the final default by `RequestDataSetGenerator`.
///
/// # Examples
///
/// ```
/// use httpsmoke::prelude::*;
///
/// let info = RouteInfo::new("product_detail", "/product/:id");
/// let mut config = RouteConfig::new(&info, "1");
///
/// config.add_extra("missing", |data_set| {
///     data_set.set_parameter("id", "999");
///     data_set.set_expected_status_code(404);
/// });
///
/// assert_eq!(config.default_data_set().parameter("id"), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteConfig {
    default: RequestDataSet,
    parameter_variants: Vec<ParameterVariant>,
    extras: Vec<RequestDataSet>,
}

impl RouteConfig {
    /// Creates the config for a route, pre-filling the default data set.
    ///
    /// Each declared parameter, required or optional, gets its declared
    /// default value or else `placeholder`.
    pub fn new(route_info: &RouteInfo, placeholder: &str) -> Self {
        let mut default = RequestDataSet::new(route_info.name());
        for parameter in route_info.parameters() {
            let value = parameter.default_value().unwrap_or(placeholder);
            default.set_parameter(parameter.name(), value);
        }

        Self {
            default,
            parameter_variants: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub fn route_name(&self) -> &str {
        self.default.route_name()
    }

    /// The route's default data set. Variants and extras are cloned from it at
    /// generation time, so changes made here are inherited by all of them.
    pub fn default_data_set(&mut self) -> &mut RequestDataSet {
        &mut self.default
    }

    /// Returns the default data set after attaching an optional debug note.
    pub fn change_default_request_data_set(
        &mut self,
        debug_note: Option<&str>,
    ) -> &mut RequestDataSet {
        if let Some(note) = debug_note {
            self.default.add_debug_note(note);
        }
        &mut self.default
    }

    /// Skips the route. Every data set generated for it is reported as skipped.
    pub fn skip_route(&mut self, debug_note: Option<&str>) {
        self.change_default_request_data_set(debug_note).skip();
    }

    /// Fans the route out over `values` of the parameter `name`.
    ///
    /// Axes registered for different parameters combine as a cartesian product.
    /// Registering the same parameter again appends to its existing axis. The
    /// parameter must be declared by the route; this is checked at generation.
    pub fn add_parameter_variant<I, V>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string());
        match self
            .parameter_variants
            .iter_mut()
            .find(|axis| axis.parameter == name)
        {
            Some(axis) => axis.values.extend(values),
            None => self.parameter_variants.push(ParameterVariant {
                parameter: name.to_string(),
                values: values.collect(),
            }),
        }
    }

    /// Registers a named extra data set and returns its override set.
    ///
    /// Only values set on the returned config are applied over the default
    /// (see `RequestDataSet::merge_extra_values_from`).
    pub fn add_extra_request_data_set(&mut self, name: &str) -> &mut dyn RequestDataSetConfig {
        let mut overlay = RequestDataSet::new(self.route_name());
        overlay.set_variant(name);
        let index = self.extras.len();
        self.extras.push(overlay);
        &mut self.extras[index]
    }

    /// Registers a named extra data set and customizes its override set.
    pub fn add_extra<F>(&mut self, name: &str, customize: F)
    where
        F: FnOnce(&mut dyn RequestDataSetConfig),
    {
        customize(self.add_extra_request_data_set(name));
    }

    pub(crate) fn default_request_data_set(&self) -> &RequestDataSet {
        &self.default
    }

    pub(crate) fn parameter_variants(&self) -> &[ParameterVariant] {
        &self.parameter_variants
    }

    pub(crate) fn extras(&self) -> &[RequestDataSet] {
        &self.extras
    }
}
