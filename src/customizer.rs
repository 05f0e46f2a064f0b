//! Routes test-author customizations to the matching `RouteConfig`s.

use crate::errors::{Error, Result};
use crate::generator::RequestDataSetGenerator;
use crate::route_config::RouteConfig;
use crate::route_info::RouteInfo;
use regex::Regex;

/// A customization applied to one route's config.
///
/// Implemented for every `Fn(&mut RouteConfig, &RouteInfo)`, so plain closures
/// can be passed wherever a `RouteCustomizer` is expected.
pub trait RouteCustomizer {
    fn apply(&self, config: &mut RouteConfig, info: &RouteInfo);
}

impl<F> RouteCustomizer for F
where
    F: Fn(&mut RouteConfig, &RouteInfo),
{
    fn apply(&self, config: &mut RouteConfig, info: &RouteInfo) {
        self(config, info)
    }
}

/// The entry point handed to test authors during the customization pass.
///
/// Customizations run immediately, in the order they are requested.
/// Exact route names must exist; patterns may match nothing.
pub struct RouteConfigCustomizer<'a> {
    generators: &'a mut [RequestDataSetGenerator],
}

impl<'a> RouteConfigCustomizer<'a> {
    pub fn new(generators: &'a mut [RequestDataSetGenerator]) -> Self {
        Self { generators }
    }

    /// Applies the customizer to every route.
    pub fn customize(&mut self, customizer: impl RouteCustomizer) {
        for generator in self.generators.iter_mut() {
            let (config, info) = generator.parts_mut();
            customizer.apply(config, info);
        }
    }

    /// Applies the customizer to the route with exactly this name.
    ///
    /// # Errors
    /// `Error::RouteNameNotFound` if no discovered route has this name.
    pub fn customize_by_route_name(
        &mut self,
        name: &str,
        customizer: impl RouteCustomizer,
    ) -> Result<()> {
        self.customize_by_route_names(&[name], customizer)
    }

    /// Applies the customizer to each named route.
    ///
    /// All names are checked before anything is applied, so a typo leaves
    /// every config untouched.
    pub fn customize_by_route_names(
        &mut self,
        names: &[&str],
        customizer: impl RouteCustomizer,
    ) -> Result<()> {
        if let Some(missing) = names.iter().find(|name| !self.has_route(name)) {
            return Err(Error::RouteNameNotFound {
                name: missing.to_string(),
            });
        }

        for generator in self.generators.iter_mut() {
            let (config, info) = generator.parts_mut();
            if names.contains(&info.name()) {
                log::debug!("Customizing route '{}'", info.name());
                customizer.apply(config, info);
            }
        }
        Ok(())
    }

    /// Applies the customizer to every route whose whole name matches `pattern`.
    ///
    /// Returns the number of routes customized; matching nothing is not an error.
    ///
    /// # Errors
    /// `Error::InvalidPattern` if `pattern` is not a valid regular expression.
    pub fn customize_by_route_name_pattern(
        &mut self,
        pattern: &str,
        customizer: impl RouteCustomizer,
    ) -> Result<usize> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        let mut matched = 0;
        for generator in self.generators.iter_mut() {
            let (config, info) = generator.parts_mut();
            if regex.is_match(info.name()) {
                customizer.apply(config, info);
                matched += 1;
            }
        }

        if matched == 0 {
            log::debug!("Route name pattern '{}' matched no routes", pattern);
        }
        Ok(matched)
    }

    fn has_route(&self, name: &str) -> bool {
        self.generators
            .iter()
            .any(|generator| generator.route_info().name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_set::RequestDataSetConfig;
    use axum::http::Method;

    fn generators() -> Vec<RequestDataSetGenerator> {
        [
            RouteInfo::new("front_homepage", "/").methods([Method::GET]),
            RouteInfo::new("front_product_detail", "/product/:id").methods([Method::GET]),
            RouteInfo::new("admin_dashboard", "/admin").methods([Method::GET]),
            RouteInfo::new("admin_login_check", "/admin/login").methods([Method::POST]),
        ]
        .into_iter()
        .map(|info| RequestDataSetGenerator::new(info, "1"))
        .collect()
    }

    fn expected_codes(generators: &[RequestDataSetGenerator]) -> Vec<u16> {
        generators
            .iter()
            .map(|g| g.route_config().default_request_data_set().expected_status_code())
            .collect()
    }

    #[test]
    fn test_customize_by_route_name() -> anyhow::Result<()> {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        customizer.customize_by_route_name(
            "admin_dashboard",
            |config: &mut RouteConfig, _: &RouteInfo| {
                config.default_data_set().set_expected_status_code(302);
            },
        )?;

        assert_eq!(expected_codes(&generators), vec![200, 200, 302, 200]);
        Ok(())
    }

    #[test]
    fn test_unknown_route_name_fails() {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        let result = customizer
            .customize_by_route_name("front_product_list", |_: &mut RouteConfig, _: &RouteInfo| {});

        match result {
            Err(Error::RouteNameNotFound { name }) => assert_eq!(name, "front_product_list"),
            other => panic!("Expected Error::RouteNameNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_route_names_are_checked_before_applying() {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        let result = customizer.customize_by_route_names(
            &["front_homepage", "front_typo"],
            |config: &mut RouteConfig, _: &RouteInfo| {
                config.default_data_set().set_expected_status_code(500);
            },
        );

        assert!(matches!(result, Err(Error::RouteNameNotFound { .. })));
        assert_eq!(expected_codes(&generators), vec![200, 200, 200, 200]);
    }

    #[test]
    fn test_pattern_matches_whole_name() -> anyhow::Result<()> {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        let matched = customizer.customize_by_route_name_pattern(
            "admin_.*",
            |config: &mut RouteConfig, _: &RouteInfo| {
                config.default_data_set().set_expected_status_code(302);
            },
        )?;
        assert_eq!(matched, 2);

        // A bare prefix does not match because the pattern is anchored.
        let matched = customizer.customize_by_route_name_pattern(
            "admin",
            |config: &mut RouteConfig, _: &RouteInfo| {
                config.default_data_set().set_expected_status_code(500);
            },
        )?;
        assert_eq!(matched, 0);

        assert_eq!(expected_codes(&generators), vec![200, 200, 302, 302]);
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        let result = customizer
            .customize_by_route_name_pattern("admin_(", |_: &mut RouteConfig, _: &RouteInfo| {});
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_customize_all_routes_using_route_info() {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        customizer.customize(|config: &mut RouteConfig, info: &RouteInfo| {
            if !info.is_http_method_allowed(&Method::GET) {
                config.skip_route(Some("Only routes supporting GET method are tested."));
            }
        });

        let skipped: Vec<&str> = generators
            .iter()
            .filter(|g| g.route_config().default_request_data_set().is_skipped())
            .map(|g| g.route_info().name())
            .collect();
        assert_eq!(skipped, vec!["admin_login_check"]);
    }

    #[test]
    fn test_customizations_apply_in_call_order() -> anyhow::Result<()> {
        let mut generators = generators();
        let mut customizer = RouteConfigCustomizer::new(&mut generators);
        customizer.customize(|config: &mut RouteConfig, _: &RouteInfo| {
            config.default_data_set().set_expected_status_code(401);
        });
        customizer.customize_by_route_name(
            "front_homepage",
            |config: &mut RouteConfig, _: &RouteInfo| {
                config.default_data_set().set_expected_status_code(200);
            },
        )?;

        assert_eq!(expected_codes(&generators), vec![200, 401, 401, 401]);
        Ok(())
    }
}
