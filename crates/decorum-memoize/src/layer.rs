use crate::config::{MemoizeConfig, MemoizeConfigBuilder};
use crate::Memoize;
use decorum_core::{CallError, Callable, Decorator, Options};
use std::sync::Arc;
use tower_layer::Layer;

/// A [`Layer`] that memoizes the callable it wraps.
///
/// # State Isolation
///
/// Each call to [`layer()`](Layer::layer) creates a new, empty memo table.
/// Wrapping the same function twice gives two tables that never see each
/// other's results.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, Value};
/// use decorum_memoize::MemoizeLayer;
/// use tower::ServiceBuilder;
///
/// let square = callable_fn("square", "", |args: CallArgs| {
///     let n = args.get(0).and_then(Value::as_int).unwrap_or(0);
///     Ok(Value::Int(n * n))
/// });
///
/// let memoized = ServiceBuilder::new()
///     .layer(MemoizeLayer::builder().capacity(128).build().unwrap())
///     .service(square);
///
/// assert_eq!(memoized.call(CallArgs::new().arg(12)).unwrap(), Value::Int(144));
/// ```
#[derive(Clone)]
pub struct MemoizeLayer {
    config: Arc<MemoizeConfig>,
}

impl MemoizeLayer {
    /// Creates a new `MemoizeLayer` with the given configuration.
    pub fn new(config: MemoizeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Creates a new builder for configuring a memoize layer.
    pub fn builder() -> MemoizeConfigBuilder {
        MemoizeConfigBuilder::new()
    }

    /// The configured capacity, or `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.config.capacity.map(|c| c.get())
    }
}

impl Decorator for MemoizeLayer {
    const BEHAVIOR: &'static str = "memoize";

    fn defaults() -> Self {
        Self::new(MemoizeConfig {
            capacity: None,
            event_listeners: Default::default(),
        })
    }

    /// Accepts `capacity` (int, at least 1).
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let capacity = reader.positive_int("capacity")?;
        reader.finish()?;

        let mut builder = MemoizeConfigBuilder::new();
        if let Some(capacity) = capacity {
            builder = builder.capacity(usize::try_from(capacity).map_err(|_| {
                CallError::invalid_config(Self::BEHAVIOR, "capacity is too large")
            })?);
        }
        builder.build()
    }
}

impl<S: Callable> Layer<S> for MemoizeLayer {
    type Service = Memoize<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Memoize::new(inner, Arc::clone(&self.config))
    }
}
