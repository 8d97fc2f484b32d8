use crate::PluginRegistry;
use decorum_core::Callable;
use std::sync::Arc;
use tower_layer::Layer;

/// A [`Layer`] that registers the callable it is applied to and returns it
/// unchanged.
///
/// Place it outermost in a stack to register the fully wrapped callable.
/// Because wrappers report the innermost function's name, the entry is keyed
/// by that name either way.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, Value};
/// use decorum_registry::{PluginRegistry, RegisterLayer};
/// use tower::ServiceBuilder;
///
/// let plugins = PluginRegistry::new();
/// let be_awesome = ServiceBuilder::new()
///     .layer(RegisterLayer::new(plugins.clone()))
///     .service(callable_fn("be_awesome", "", |_| Ok(Value::from("Yo, together we are awesome!"))));
///
/// assert!(plugins.contains("be_awesome"));
/// assert_eq!(be_awesome.call(CallArgs::new()).unwrap(), Value::from("Yo, together we are awesome!"));
/// ```
#[derive(Debug, Clone)]
pub struct RegisterLayer {
    registry: PluginRegistry,
}

impl RegisterLayer {
    pub fn new(registry: PluginRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }
}

impl<S> Layer<S> for RegisterLayer
where
    S: Callable + Clone + 'static,
{
    type Service = S;

    fn layer(&self, inner: S) -> Self::Service {
        self.registry.register(Arc::new(inner.clone()));
        inner
    }
}
