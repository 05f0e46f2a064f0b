//! Expands one route's `RouteConfig` into its final list of data sets.

use crate::data_set::{RequestDataSet, RequestDataSetConfig};
use crate::errors::{Error, Result};
use crate::route_config::{ParameterVariant, RouteConfig};
use crate::route_info::RouteInfo;
use std::collections::HashSet;

/// Holds a discovered route together with its configuration.
///
/// Generation never mutates the config, so calling `generate` twice on an
/// unchanged config yields the same data sets in the same order.
#[derive(Debug, Clone)]
pub struct RequestDataSetGenerator {
    route_info: RouteInfo,
    route_config: RouteConfig,
}

impl RequestDataSetGenerator {
    /// Creates a generator whose default data set is pre-filled with `placeholder`.
    pub fn new(route_info: RouteInfo, placeholder: &str) -> Self {
        let route_config = RouteConfig::new(&route_info, placeholder);
        Self {
            route_info,
            route_config,
        }
    }

    pub fn route_info(&self) -> &RouteInfo {
        &self.route_info
    }

    pub fn route_config(&self) -> &RouteConfig {
        &self.route_config
    }

    /// Gives mutable access to the config together with the route metadata.
    pub(crate) fn parts_mut(&mut self) -> (&mut RouteConfig, &RouteInfo) {
        (&mut self.route_config, &self.route_info)
    }

    /// Produces the default data set, then one data set per parameter-variant
    /// combination, then one per extra, in registration order.
    ///
    /// # Errors
    /// * `Error::UnknownParameter` if an axis names an undeclared parameter.
    /// * `Error::EmptyParameterVariant` if an axis has no values.
    /// * `Error::DuplicateDataSetName` if two data sets would share a name.
    pub fn generate(&self) -> Result<Vec<RequestDataSet>> {
        let default = self.route_config.default_request_data_set();
        let axes = self.route_config.parameter_variants();
        self.validate_axes(axes)?;

        let mut data_sets = vec![default.clone()];

        for combination in cartesian_product(axes) {
            let mut variant = default.clone();
            let label = combination
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join(",");
            for (name, value) in &combination {
                variant.set_parameter(name, value);
            }
            variant.set_variant(label);
            data_sets.push(variant);
        }

        for overlay in self.route_config.extras() {
            let mut extra = default.clone();
            extra.merge_extra_values_from(overlay);
            if let Some(label) = overlay.variant() {
                extra.set_variant(label);
            }
            data_sets.push(extra);
        }

        ensure_unique_names(&data_sets)?;

        log::debug!(
            "Generated {} data set(s) for route '{}'",
            data_sets.len(),
            self.route_info.name()
        );
        Ok(data_sets)
    }

    fn validate_axes(&self, axes: &[ParameterVariant]) -> Result<()> {
        for axis in axes {
            if !self.route_info.is_parameter_declared(&axis.parameter) {
                return Err(Error::UnknownParameter {
                    route: self.route_info.name().to_string(),
                    parameter: axis.parameter.clone(),
                });
            }
            if axis.values.is_empty() {
                return Err(Error::EmptyParameterVariant {
                    route: self.route_info.name().to_string(),
                    parameter: axis.parameter.clone(),
                });
            }
        }
        Ok(())
    }
}

/// All value combinations, first axis outermost. No axes yields no combinations.
fn cartesian_product(axes: &[ParameterVariant]) -> Vec<Vec<(&str, &str)>> {
    if axes.is_empty() {
        return Vec::new();
    }

    let mut combinations: Vec<Vec<(&str, &str)>> = vec![Vec::new()];
    for axis in axes {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                axis.values.iter().map(move |value| {
                    let mut combination = prefix.clone();
                    combination.push((axis.parameter.as_str(), value.as_str()));
                    combination
                })
            })
            .collect();
    }
    combinations
}

fn ensure_unique_names(data_sets: &[RequestDataSet]) -> Result<()> {
    let mut seen = HashSet::new();
    for data_set in data_sets {
        let name = data_set.name();
        if !seen.insert(name.clone()) {
            return Err(Error::DuplicateDataSetName { name });
        }
    }
    Ok(())
}
