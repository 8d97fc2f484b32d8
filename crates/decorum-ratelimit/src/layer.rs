use crate::config::{SlowDownConfig, SlowDownConfigBuilder};
use crate::SlowDown;
use decorum_core::{CallError, Callable, Decorator, Options};
use std::sync::Arc;
use std::time::Duration;
use tower_layer::Layer;

/// A [`Layer`] that pauses the calling thread before every call.
///
/// # Examples
///
/// ```
/// use decorum_core::{callable_fn, CallArgs, Callable, DecorateExt, Value};
/// use decorum_ratelimit::SlowDownLayer;
/// use std::time::Duration;
///
/// let countdown = callable_fn("countdown", "", |_| Ok(Value::None)).decorate(
///     SlowDownLayer::builder()
///         .delay(Duration::from_millis(5))
///         .build()
///         .unwrap(),
/// );
/// countdown.call(CallArgs::new().arg(3)).unwrap();
/// ```
#[derive(Clone)]
pub struct SlowDownLayer {
    config: Arc<SlowDownConfig>,
}

impl SlowDownLayer {
    /// Creates a new `SlowDownLayer` with the given configuration.
    pub fn new(config: SlowDownConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn builder() -> SlowDownConfigBuilder {
        SlowDownConfigBuilder::new()
    }

    /// The pause applied before each call.
    pub fn delay(&self) -> Duration {
        self.config.delay
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }
}

impl Decorator for SlowDownLayer {
    const BEHAVIOR: &'static str = "slow_down";

    fn defaults() -> Self {
        Self::new(SlowDownConfig {
            delay: Duration::from_secs(1),
            event_listeners: Default::default(),
            name: "<unnamed>".to_string(),
        })
    }

    /// Accepts `delay` (seconds, non-negative) or `rate` (calls per second,
    /// positive), not both.
    fn configured(options: &Options) -> Result<Self, CallError> {
        let mut reader = options.reader(Self::BEHAVIOR);
        let delay = reader.seconds("delay")?;
        let rate = reader.positive_float("rate")?;
        reader.finish()?;

        let builder = match (delay, rate) {
            (Some(_), Some(_)) => {
                return Err(CallError::invalid_config(
                    Self::BEHAVIOR,
                    "delay and rate are mutually exclusive",
                ))
            }
            (Some(delay), None) => SlowDownConfigBuilder::new().delay(delay),
            (None, Some(rate)) => SlowDownConfigBuilder::new().rate(rate),
            (None, None) => SlowDownConfigBuilder::new(),
        };
        builder.build()
    }
}

impl<S: Callable> Layer<S> for SlowDownLayer {
    type Service = SlowDown<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SlowDown::new(inner, Arc::clone(&self.config))
    }
}
