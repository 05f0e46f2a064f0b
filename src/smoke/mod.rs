//! The smoke test harness: turns every discovered route into data sets and
//! checks the status code each one produces.
//!
//! A run has three phases. Discovery asks the router adapter for every route
//! and creates one generator per route. Customization hands the registered
//! callbacks a [`RouteConfigCustomizer`]. Generation flattens all generators
//! into an ordered map keyed by data set name. Only after all three succeed is
//! any request dispatched, so a stale route name or a colliding variant fails
//! the suite before the application is touched.

use crate::config::SmokeConfig;
use crate::customizer::RouteConfigCustomizer;
use crate::data_set::{RequestDataSet, RequestDataSetConfig};
use crate::errors::{Error, Result};
use crate::generator::RequestDataSetGenerator;
use crate::kernel::Kernel;
use crate::route_config::RouteConfig;
use crate::route_info::RouteInfo;
use crate::router::RouterAdapter;
use axum::body::Body;
use axum::http::Request;
use indexmap::map::Entry;
use indexmap::IndexMap;

mod report;
mod request;

pub use report::{SmokeReport, SmokeResult, TestOutcome};

type Customization<'a> = Box<dyn Fn(&mut RouteConfigCustomizer<'_>) -> Result<()> + 'a>;

/// A smoke test suite over one application.
///
/// # Examples
///
/// ```
/// use httpsmoke::prelude::*;
/// use axum::{http::StatusCode, routing::get};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> httpsmoke::errors::Result<()> {
/// let table: RouteTable = RouteTable::new()
///     .route(RouteInfo::new("homepage", "/"), get(|| async { "welcome" }))
///     .route(
///         RouteInfo::new("admin", "/admin"),
///         get(|| async { StatusCode::UNAUTHORIZED }),
///     );
/// let kernel = AxumKernel::new(table.router());
///
/// let mut suite = HttpSmokeTest::new(&table, &kernel, SmokeConfig::default());
/// suite.set_expected_code_for_route("admin", 401);
///
/// let report = suite.run().await?.into_result()?;
/// assert_eq!(report.passed().count(), 2);
/// # Ok(())
/// # }
/// ```
pub struct HttpSmokeTest<'a, K> {
    adapter: &'a dyn RouterAdapter,
    kernel: &'a K,
    config: SmokeConfig,
    customizations: Vec<Customization<'a>>,
}

impl<'a, K: Kernel> HttpSmokeTest<'a, K> {
    pub fn new(adapter: &'a dyn RouterAdapter, kernel: &'a K, config: SmokeConfig) -> Self {
        Self {
            adapter,
            kernel,
            config,
            customizations: Vec::new(),
        }
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Registers a customization pass. Passes run in registration order each
    /// time the data provider is built.
    pub fn customize_route_configs<F>(&mut self, customization: F) -> &mut Self
    where
        F: Fn(&mut RouteConfigCustomizer<'_>) -> Result<()> + 'a,
    {
        self.customizations.push(Box::new(customization));
        self
    }

    /// Expects `code` from the default data set of the route, and from every
    /// variant and extra that does not override it.
    pub fn set_expected_code_for_route(&mut self, route_name: &str, code: u16) -> &mut Self {
        let route_name = route_name.to_string();
        self.customize_route_configs(move |customizer| {
            customizer.customize_by_route_name(
                &route_name,
                move |config: &mut RouteConfig, _: &RouteInfo| {
                    config.default_data_set().set_expected_status_code(code);
                },
            )
        })
    }

    /// Sends `body` as a POST request for the route's default data set.
    pub fn set_post_data_for_route(&mut self, route_name: &str, body: &str) -> &mut Self {
        let route_name = route_name.to_string();
        let body = body.to_string();
        self.customize_route_configs(move |customizer| {
            customizer.customize_by_route_name(
                &route_name,
                |config: &mut RouteConfig, _: &RouteInfo| {
                    config.default_data_set().set_post_request_body(&body);
                },
            )
        })
    }

    /// Discovers, customizes and generates every data set, keyed by name.
    ///
    /// # Errors
    /// Any configuration error raised by a customization or a generator, and
    /// `Error::DuplicateDataSetName` if two routes produce the same name.
    pub fn data_provider(&self) -> Result<IndexMap<String, RequestDataSet>> {
        let mut generators: Vec<RequestDataSetGenerator> = self
            .adapter
            .all_route_info()
            .into_iter()
            .map(|info| RequestDataSetGenerator::new(info, &self.config.placeholder))
            .collect();
        log::debug!("Discovered {} route(s)", generators.len());

        {
            let mut customizer = RouteConfigCustomizer::new(&mut generators);
            for customization in &self.customizations {
                customization(&mut customizer)?;
            }
        }

        let mut data_sets = IndexMap::new();
        for generator in &generators {
            for data_set in generator.generate()? {
                match data_sets.entry(data_set.name()) {
                    Entry::Occupied(entry) => {
                        return Err(Error::DuplicateDataSetName {
                            name: entry.key().clone(),
                        })
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(data_set);
                    }
                }
            }
        }
        Ok(data_sets)
    }

    /// Builds the request for a data set: GET without a body, POST otherwise,
    /// with the data set's auth applied last.
    pub fn create_request(&self, data_set: &RequestDataSet) -> Result<Request<Body>> {
        let relative = self.adapter.generate_uri(data_set)?;
        request::build(&self.config, &relative, data_set)
    }

    /// Tests one data set.
    ///
    /// Deferred setups run first, so they may still change any value, including
    /// the skip flag. A skipped data set is reported without dispatching.
    #[tracing::instrument(skip_all, fields(data_set = %data_set.name()))]
    pub async fn test_http_response(&self, mut data_set: RequestDataSet) -> Result<TestOutcome> {
        data_set.execute_deferred_setups(self.kernel.container())?;

        if data_set.is_skipped() {
            let message = report::skip_message(&data_set);
            log::info!("{}", message);
            return Ok(TestOutcome::Skipped { message });
        }

        let request = self.create_request(&data_set)?;
        log::debug!("{} {}", request.method(), request.uri());

        let response = self.kernel.handle(request).await?;
        let actual = response.status().as_u16();
        let expected = data_set.expected_status_code();

        if actual == expected {
            log::debug!("'{}' returned {}", data_set.name(), actual);
            Ok(TestOutcome::Passed)
        } else {
            let message = report::failure_message(&data_set, actual);
            log::warn!("{}", message);
            Ok(TestOutcome::Failed {
                message,
                expected,
                actual,
            })
        }
    }

    /// Tests every data set once, in data provider order.
    ///
    /// Configuration errors abort the run before anything is dispatched. With
    /// `fail_fast` set, the run stops after the first failed data set.
    pub async fn run(&self) -> Result<SmokeReport> {
        let data_sets = self.data_provider()?;
        log::info!("Running {} smoke test data set(s)", data_sets.len());

        let mut report = SmokeReport::default();
        for (name, data_set) in data_sets {
            let outcome = self.test_http_response(data_set).await?;
            let failed = outcome.is_failed();
            report.push(name, outcome);
            if failed && self.config.fail_fast {
                log::warn!("Stopping at the first failure (fail_fast)");
                break;
            }
        }

        log::info!(
            "Smoke run finished: {} passed, {} skipped, {} failed",
            report.passed().count(),
            report.skipped().count(),
            report.failed().count()
        );
        Ok(report)
    }
}
