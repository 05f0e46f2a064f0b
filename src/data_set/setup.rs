//! Deferred setup callbacks and the runtime container they receive.

use super::RequestDataSet;
use std::sync::Arc;

/// The opaque runtime container handed to deferred setups.
///
/// The harness never mutates it; the application under test decides what it
/// holds (database pools, fixtures, services).
pub type Container = axum::http::Extensions;

/// A callback run once per data set, after all static customization and
/// before the request is built.
pub trait DeferredSetup: Send + Sync {
    fn run(&self, data_set: &mut RequestDataSet, container: &Container) -> anyhow::Result<()>;
}

impl<F> DeferredSetup for F
where
    F: Fn(&mut RequestDataSet, &Container) -> anyhow::Result<()> + Send + Sync,
{
    fn run(&self, data_set: &mut RequestDataSet, container: &Container) -> anyhow::Result<()> {
        self(data_set, container)
    }
}

/// Wraps a closure as a shareable deferred setup.
///
/// # Examples
///
/// ```
/// use httpsmoke::prelude::*;
///
/// #[derive(Clone)]
/// struct ExistingProductId(u32);
///
/// let mut data_set = RequestDataSet::new("product_detail");
/// data_set.add_deferred_setup(deferred(|data_set, container| {
///     let id = container
///         .get::<ExistingProductId>()
///         .ok_or_else(|| anyhow::anyhow!("no product fixture"))?;
///     data_set.set_parameter("id", &id.0.to_string());
///     Ok(())
/// }));
///
/// let mut container = Container::new();
/// container.insert(ExistingProductId(7));
/// data_set.execute_deferred_setups(&container).unwrap();
/// assert_eq!(data_set.parameter("id"), Some("7"));
/// ```
pub fn deferred<F>(setup: F) -> Arc<dyn DeferredSetup>
where
    F: Fn(&mut RequestDataSet, &Container) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(setup)
}
